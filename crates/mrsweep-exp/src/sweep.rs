use indexmap::{IndexMap, IndexSet};
use mrsweep_core::errors::{ErrorInfo, FieldViolation, SweepError, ValidationErrors};
use mrsweep_core::schema::{self, FIELDS, OUTPUT_PATH};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sweep-only key selecting how the external runner launches jobs.
pub const MODE: &str = "mode";
/// Sweep-only key for the pause between job launches, in seconds.
pub const SLEEP_BETWEEN_LAUNCHES: &str = "sleep_between_launches";

/// How the external runner schedules the expanded jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentMode {
    /// One job at a time, each with its own measurement session.
    #[default]
    Sequential,
    /// All jobs launched back to back under one measurement session.
    Parallel,
}

/// Candidate lists for every schema field plus the sweep's meta settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSpecification {
    candidates: IndexMap<&'static str, Vec<Value>>,
    user_configured_fields: IndexSet<String>,
    mode: ExperimentMode,
    sleep_between_launches: u64,
}

impl SweepSpecification {
    /// Normalizes raw caller input into one non-empty candidate list per field.
    ///
    /// Absent or `null` fields get `[default]`; scalars, strings and mappings
    /// become single candidates; arrays are kept as given. Only non-null
    /// fields count as user configured.
    pub fn normalize(raw: &IndexMap<String, Value>) -> Result<Self, SweepError> {
        let mut supplied: IndexMap<&'static str, &Value> = IndexMap::new();
        let mut mode = ExperimentMode::default();
        let mut sleep_between_launches = default_sleep_between_launches();
        let mut user_configured_fields = IndexSet::new();
        let mut errors = ValidationErrors::default();

        for (key, value) in raw {
            match key.as_str() {
                MODE | SLEEP_BETWEEN_LAUNCHES if value.is_null() => {}
                MODE => match parse_mode(value) {
                    Ok(parsed) => {
                        mode = parsed;
                        user_configured_fields.insert(MODE.to_string());
                    }
                    Err(violation) => errors.violations.push(violation),
                },
                SLEEP_BETWEEN_LAUNCHES => match value.as_u64() {
                    Some(seconds) => {
                        sleep_between_launches = seconds;
                        user_configured_fields.insert(SLEEP_BETWEEN_LAUNCHES.to_string());
                    }
                    None => errors.violations.push(FieldViolation::new(
                        SLEEP_BETWEEN_LAUNCHES,
                        format!("expected a non-negative number of seconds, got {value}"),
                    )),
                },
                _ => {
                    let spec = schema::lookup(key).ok_or_else(|| {
                        SweepError::Configuration(
                            ErrorInfo::new("unknown_sweep_field", format!("unknown field `{key}`"))
                                .with_context("field", key.as_str()),
                        )
                    })?;
                    if supplied.insert(spec.name, value).is_some() {
                        return Err(SweepError::Configuration(
                            ErrorInfo::new(
                                "duplicate_sweep_field",
                                format!("`{}` supplied more than once", spec.name),
                            )
                            .with_context("field", spec.name),
                        ));
                    }
                }
            }
        }
        if !errors.violations.is_empty() {
            return Err(SweepError::Validation(errors));
        }

        let mut candidates = IndexMap::with_capacity(FIELDS.len());
        for spec in FIELDS.iter() {
            let list = match supplied.get(spec.name) {
                None | Some(Value::Null) => vec![spec.default.to_json()],
                Some(Value::Array(items)) if items.is_empty() => {
                    return Err(SweepError::Configuration(
                        ErrorInfo::new(
                            "empty_candidates",
                            format!("`{}` has an empty candidate list", spec.name),
                        )
                        .with_context("field", spec.name)
                        .with_hint("omit the field to use its default"),
                    ));
                }
                Some(Value::Array(items)) => items.clone(),
                Some(scalar) => vec![(*scalar).clone()],
            };
            if supplied.get(spec.name).is_some_and(|value| !value.is_null()) {
                user_configured_fields.insert(spec.name.to_string());
            }
            candidates.insert(spec.name, list);
        }

        Ok(Self {
            candidates,
            user_configured_fields,
            mode,
            sleep_between_launches,
        })
    }

    /// Candidate list for a field, by canonical name.
    pub fn candidates(&self, name: &str) -> Option<&[Value]> {
        self.candidates.get(name).map(Vec::as_slice)
    }

    /// Every field's candidate list, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Value])> {
        self.candidates
            .iter()
            .map(|(name, values)| (*name, values.as_slice()))
    }

    /// Fields the caller explicitly supplied, including sweep meta keys.
    pub fn user_configured_fields(&self) -> &IndexSet<String> {
        &self.user_configured_fields
    }

    /// Returns `true` if the caller supplied a non-null value for `name`.
    pub fn is_user_configured(&self, name: &str) -> bool {
        self.user_configured_fields.contains(name)
    }

    /// Number of jobs the product of every non-output field yields, or `None`
    /// if it does not fit in `usize`.
    pub fn combination_count(&self) -> Option<usize> {
        self.iter()
            .filter(|(name, _)| *name != OUTPUT_PATH)
            .try_fold(1usize, |total, (_, values)| total.checked_mul(values.len()))
    }

    /// Launch scheduling requested for the sweep.
    pub fn mode(&self) -> ExperimentMode {
        self.mode
    }

    /// Pause between launches, in seconds.
    pub fn sleep_between_launches(&self) -> u64 {
        self.sleep_between_launches
    }
}

fn default_sleep_between_launches() -> u64 {
    5
}

fn parse_mode(value: &Value) -> Result<ExperimentMode, FieldViolation> {
    let invalid = || {
        FieldViolation::new(
            MODE,
            format!("expected `sequential` or `parallel`, got {value}"),
        )
    };
    let text = value.as_str().ok_or_else(invalid)?;
    serde_json::from_value(Value::String(text.trim().to_ascii_lowercase())).map_err(|_| invalid())
}
