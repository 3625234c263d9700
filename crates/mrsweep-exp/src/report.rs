use indexmap::IndexMap;
use mrsweep_core::ExecutorSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::ExpandedGrid;
use crate::session::session_for;
use crate::sweep::{ExperimentMode, SweepSpecification};
use crate::trigger::{TriggerAction, TriggerSender};

/// Everything the external runner needs to launch one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub user_selection: IndexMap<String, Value>,
    pub output_path: String,
    pub command: Vec<String>,
    /// Start trigger issued before this job; absent when the sweep shares one session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger: Option<Vec<String>>,
}

/// Launch plan for a whole sweep, persisted for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub grid_hash: String,
    pub mode: ExperimentMode,
    pub sleep_between_launches: u64,
    pub jobs: Vec<JobReport>,
    /// Start trigger issued once before the first job when sessions are shared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_start_trigger: Option<Vec<String>>,
    pub stop_trigger: Vec<String>,
}

/// Assembles the launch plan for an expanded grid.
pub fn build_report(
    grid: &ExpandedGrid,
    spec: &SweepSpecification,
    executor: &ExecutorSettings,
    trigger: &TriggerSender,
    shared_session_id: Option<&str>,
) -> SweepReport {
    let mode = spec.mode();
    let per_job_sessions = shared_session_id.is_none() && mode == ExperimentMode::Sequential;
    let jobs = grid
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let session_id = session_for(entry, mode, shared_session_id);
            let start_trigger = per_job_sessions
                .then(|| trigger.build_command(TriggerAction::StartMeasurement, session_id.as_deref()));
            JobReport {
                index,
                session_id,
                user_selection: entry
                    .user_selection()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.to_json()))
                    .collect(),
                output_path: entry.config().output_path().to_string(),
                command: executor.command(entry.config()),
                start_trigger,
            }
        })
        .collect();
    let shared_start_trigger = (!per_job_sessions)
        .then(|| trigger.build_command(TriggerAction::StartMeasurement, shared_session_id));

    SweepReport {
        grid_hash: grid.grid_hash().to_string(),
        mode,
        sleep_between_launches: spec.sleep_between_launches(),
        jobs,
        shared_start_trigger,
        stop_trigger: trigger.build_command(TriggerAction::StopMeasurement, None),
    }
}
