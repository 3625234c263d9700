use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::{json, Value};

use crate::codec::CompressionCodec;

/// Concrete, already validated value of one job parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer fields, including byte sizes.
    Integer(i64),
    /// Fractional fields.
    Float(f64),
    /// Toggles.
    Boolean(bool),
    /// Plain strings and paths.
    Text(Cow<'static, str>),
    /// Compression codec selection.
    Codec(CompressionCodec),
}

impl ParamValue {
    /// Token used in the executor's argument grammar.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Codec(codec) => codec.class_name().to_string(),
            other => other.label(),
        }
    }

    /// Short token used in labels and summaries; codecs use their member name.
    pub fn label(&self) -> String {
        match self {
            ParamValue::Integer(value) => value.to_string(),
            ParamValue::Float(value) => format_float(*value),
            ParamValue::Boolean(value) => value.to_string(),
            ParamValue::Text(value) => value.to_string(),
            ParamValue::Codec(codec) => codec.name().to_string(),
        }
    }

    /// JSON form accepted back by [`crate::JobConfiguration::parse`].
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Integer(value) => json!(value),
            ParamValue::Float(value) => json!(value),
            ParamValue::Boolean(value) => json!(value),
            ParamValue::Text(value) => json!(value),
            ParamValue::Codec(codec) => json!(codec.name()),
        }
    }

    /// Integer payload, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// Whole floats keep a trailing `.0` so the executor sees a fractional literal.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
