//! Command construction for the measurement trigger tool.
//!
//! Nothing here spawns processes; the runner executes the returned argument
//! vectors with [`TriggerSender::environment`] added to its environment.

use std::fmt::{self, Display};

use mrsweep_core::errors::{FieldViolation, SweepError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Actions understood by the trigger receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAction {
    StartMeasurement,
    StopMeasurement,
    StopProgram,
}

impl TriggerAction {
    /// Wire name passed as the trigger tool's positional argument.
    pub const fn as_str(self) -> &'static str {
        match self {
            TriggerAction::StartMeasurement => "start_measurement",
            TriggerAction::StopMeasurement => "stop_measurement",
            TriggerAction::StopProgram => "stop_program",
        }
    }
}

impl Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the measurement receivers live and how the trigger tool is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSender {
    pub python_path: String,
    pub module: String,
    /// `PYTHONPATH` the trigger module needs.
    pub pythonpath: String,
    pub resource_manager_url: String,
    pub namenode_url: String,
    pub history_server_url: String,
    /// Hostname prefix; datanodes are `{prefix}-1` .. `{prefix}-N`.
    pub datanode_prefix: String,
    pub datanode_port: u16,
    pub number_of_datanodes: u32,
}

impl Default for TriggerSender {
    fn default() -> Self {
        Self {
            python_path: "/green_security_measurements/green_security_venv/bin/python".to_string(),
            module: "scanner_trigger.trigger_sender".to_string(),
            pythonpath: "/green_security_measurements/Scanner".to_string(),
            resource_manager_url: "resourcemanager-1:65432".to_string(),
            namenode_url: "namenode-1:65432".to_string(),
            history_server_url: "historyserver-1:65432".to_string(),
            datanode_prefix: "datanode".to_string(),
            datanode_port: 65432,
            number_of_datanodes: 3,
        }
    }
}

impl TriggerSender {
    /// Rejects settings the trigger tool cannot work with.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.number_of_datanodes == 0 {
            return Err(SweepError::Validation(ValidationErrors::single(
                FieldViolation::new("number_of_datanodes", "must be greater than 0, got 0"),
            )));
        }
        Ok(())
    }

    /// `host:port` of every datanode receiver.
    pub fn datanode_urls(&self) -> Vec<String> {
        (1..=self.number_of_datanodes)
            .map(|idx| format!("{}-{idx}:{}", self.datanode_prefix, self.datanode_port))
            .collect()
    }

    /// Every receiver: resource manager, namenode, history server, then datanodes.
    pub fn receivers_addresses(&self) -> Vec<String> {
        let mut addresses = vec![
            self.resource_manager_url.clone(),
            self.namenode_url.clone(),
            self.history_server_url.clone(),
        ];
        addresses.extend(self.datanode_urls());
        addresses
    }

    /// Argument vector sending `action` to every receiver.
    pub fn build_command(&self, action: TriggerAction, session_id: Option<&str>) -> Vec<String> {
        let mut command = vec![
            self.python_path.clone(),
            "-m".to_string(),
            self.module.clone(),
            action.to_string(),
        ];
        if let Some(session_id) = session_id.filter(|id| !id.is_empty()) {
            command.push("--session_id".to_string());
            command.push(session_id.to_string());
        }
        command.push("--receivers_addresses".to_string());
        command.push(self.receivers_addresses().join(","));
        command
    }

    /// Extra environment the trigger command must run with.
    pub fn environment(&self) -> Vec<(String, String)> {
        vec![("PYTHONPATH".to_string(), self.pythonpath.clone())]
    }
}
