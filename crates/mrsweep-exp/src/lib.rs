//! Configuration sweeps over MapReduce streaming jobs.

mod canonical;
mod grid;
mod plan;
mod report;
mod session;
mod sweep;
pub mod trigger;

pub use canonical::{stable_hash_string, to_canonical_json_bytes};
pub use grid::{expand, ExpandedGrid, GridEntry, MAX_GRID_JOBS};
pub use plan::{load_sweep_file, parse_sweep_file, SweepFile};
pub use report::{build_report, JobReport, SweepReport};
pub use session::{format_user_selection, generate_session_id, session_for};
pub use sweep::{ExperimentMode, SweepSpecification, MODE, SLEEP_BETWEEN_LAUNCHES};
pub use trigger::{TriggerAction, TriggerSender};
