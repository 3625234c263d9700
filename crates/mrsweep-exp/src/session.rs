use mrsweep_core::{schema, ParamValue};

use crate::grid::GridEntry;
use crate::sweep::ExperimentMode;

/// Builds a measurement session label from user-selected fields.
///
/// Each field contributes `alias_value`, in the order given, joined by `-`.
/// Two jobs that agree on every selected field get the same label.
pub fn generate_session_id<'a, K, I>(selected: I) -> String
where
    I: IntoIterator<Item = (K, &'a ParamValue)>,
    K: AsRef<str>,
{
    selected
        .into_iter()
        .map(|(name, value)| format!("{}_{}", short_name(name.as_ref()), value.label()))
        .collect::<Vec<_>>()
        .join("-")
}

/// Multi-line summary of the user-selected fields of one job.
pub fn format_user_selection<'a, K, I>(selected: I) -> String
where
    I: IntoIterator<Item = (K, &'a ParamValue)>,
    K: AsRef<str>,
{
    let lines: Vec<String> = selected
        .into_iter()
        .map(|(name, value)| {
            let name = name.as_ref();
            format!("  {name} (-{}): {}", short_name(name), value.label())
        })
        .collect();
    if lines.is_empty() {
        "User selection: defaults only".to_string()
    } else {
        format!("User selection:\n{}", lines.join("\n"))
    }
}

/// Session id under which `entry` should be measured.
///
/// A shared id always wins. Otherwise sequential sweeps label each job from its
/// user selection and parallel sweeps run without a per-job id.
pub fn session_for(
    entry: &GridEntry,
    mode: ExperimentMode,
    shared_session_id: Option<&str>,
) -> Option<String> {
    match (shared_session_id, mode) {
        (Some(shared), _) => Some(shared.to_string()),
        (None, ExperimentMode::Sequential) => Some(entry.session_id()),
        (None, ExperimentMode::Parallel) => None,
    }
}

fn short_name(name: &str) -> &str {
    match schema::lookup(name) {
        Some(spec) if !spec.alias.is_empty() => spec.alias,
        _ => name,
    }
}
