//! Structured error types shared across mrsweep crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to the non-validation [`SweepError`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (field names, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// A single constraint violation. Cross-field violations name every field involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Fields responsible for the violation, in schema order.
    pub fields: Vec<String>,
    /// Why the value was rejected.
    pub reason: String,
}

impl FieldViolation {
    /// Violation attributed to a single field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
            reason: reason.into(),
        }
    }

    /// Violation of a relationship between several fields.
    pub fn across<I, S>(fields: I, reason: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            reason: reason.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.fields.join("`, `"), self.reason)
    }
}

/// Every violation found while validating one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationErrors {
    /// Violations in detection order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Wraps a single violation.
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Returns `true` if any violation mentions `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.fields.iter().any(|name| name == field))
    }

    /// Names of all offending fields, deduplicated, in detection order.
    pub fn fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.violations.iter().flat_map(|v| v.fields.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    pub(crate) fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the sweep engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SweepError {
    /// A field value or a cross-field relationship violates its constraint.
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    /// Structural mismatch not attributable to a single field's value.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Serialization, schema decoding and file access errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl SweepError {
    /// Returns the validation payload, if this is a validation error.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            SweepError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the structured payload of non-validation errors.
    pub fn info(&self) -> Option<&ErrorInfo> {
        match self {
            SweepError::Configuration(info) | SweepError::Serde(info) => Some(info),
            SweepError::Validation(_) => None,
        }
    }
}

impl From<ValidationErrors> for SweepError {
    fn from(errors: ValidationErrors) -> Self {
        SweepError::Validation(errors)
    }
}
