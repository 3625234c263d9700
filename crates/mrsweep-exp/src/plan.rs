use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use mrsweep_core::errors::{ErrorInfo, SweepError};
use mrsweep_core::ExecutorSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sweep::SweepSpecification;
use crate::trigger::TriggerSender;

/// On-disk sweep description: executor and trigger settings next to the flat
/// parameter mapping (`number_of_mappers: [2, 4]`, `mode: parallel`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SweepFile {
    /// How jobs are launched.
    #[serde(default)]
    pub executor: ExecutorSettings,
    /// Measurement trigger receivers.
    #[serde(default)]
    pub trigger: TriggerSender,
    /// Raw sweep input, normalized by [`SweepFile::specification`].
    #[serde(flatten)]
    pub parameters: IndexMap<String, Value>,
}

impl SweepFile {
    /// Normalizes the parameter mapping.
    pub fn specification(&self) -> Result<SweepSpecification, SweepError> {
        SweepSpecification::normalize(&self.parameters)
    }

    /// YAML form of the file; parsing it back yields an equal `SweepFile`.
    pub fn to_yaml_string(&self) -> Result<String, SweepError> {
        serde_yaml::to_string(self)
            .map_err(|err| SweepError::Serde(ErrorInfo::new("sweep_encode", err.to_string())))
    }
}

/// Loads a sweep file from disk and checks its trigger settings.
pub fn load_sweep_file<P: AsRef<Path>>(path: P) -> Result<SweepFile, SweepError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        SweepError::Serde(
            ErrorInfo::new("sweep_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    parse_sweep_file(&text)
}

/// Parses a sweep file from YAML text.
pub fn parse_sweep_file(text: &str) -> Result<SweepFile, SweepError> {
    if text.trim().is_empty() {
        return Err(SweepError::Serde(ErrorInfo::new(
            "sweep_empty",
            "sweep file is empty",
        )));
    }
    let file: SweepFile = serde_yaml::from_str(text).map_err(|err| {
        let mut info = ErrorInfo::new("sweep_decode", err.to_string());
        if let Some(location) = err.location() {
            info = info
                .with_context("line", location.line().to_string())
                .with_context("column", location.column().to_string());
        }
        SweepError::Serde(info)
    })?;
    file.trigger.validate()?;
    Ok(file)
}
