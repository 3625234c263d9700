use indexmap::IndexMap;
use mrsweep_core::errors::{ErrorInfo, FieldViolation, SweepError, ValidationErrors};
use mrsweep_core::schema::{FIELDS, OUTPUT_PATH};
use mrsweep_core::{JobConfiguration, ParamValue};
use serde_json::Value;
use tracing::{debug, info};

use crate::canonical::stable_hash_string;
use crate::session::generate_session_id;
use crate::sweep::SweepSpecification;

/// One validated job of an expanded grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry {
    config: JobConfiguration,
    user_configured: Vec<&'static str>,
}

impl GridEntry {
    /// The job's validated configuration.
    pub fn config(&self) -> &JobConfiguration {
        &self.config
    }

    /// Schema fields the caller explicitly configured, in schema order.
    pub fn user_configured_fields(&self) -> &[&'static str] {
        &self.user_configured
    }

    /// This job's values for the user-configured fields.
    pub fn user_selection(&self) -> IndexMap<&'static str, ParamValue> {
        self.user_configured
            .iter()
            .filter_map(|name| self.config.get(name).map(|value| (*name, value.clone())))
            .collect()
    }

    /// Session label derived from [`GridEntry::user_selection`].
    pub fn session_id(&self) -> String {
        generate_session_id(&self.user_selection())
    }
}

/// Every job of a sweep, in product-iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedGrid {
    grid_hash: String,
    entries: Vec<GridEntry>,
}

impl ExpandedGrid {
    /// Stable hash of the specification the grid was expanded from.
    pub fn grid_hash(&self) -> &str {
        &self.grid_hash
    }

    /// Jobs in product-iteration order.
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    /// Iterates the jobs in order.
    pub fn iter(&self) -> std::slice::Iter<'_, GridEntry> {
        self.entries.iter()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a successfully expanded grid.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExpandedGrid {
    type Item = &'a GridEntry;
    type IntoIter = std::slice::Iter<'a, GridEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Largest number of jobs a single sweep may expand to.
pub const MAX_GRID_JOBS: usize = 100_000;

/// Expands a sweep into the Cartesian product of its candidate lists.
///
/// Fields vary in schema order with the last field varying fastest. The output
/// path is not part of the product: either one path per job is supplied and
/// paired positionally, or a single prefix is supplied and each job gets
/// `{prefix}/output_{n}`. Combinations are built and validated one at a time;
/// expansion stops at the first invalid one.
pub fn expand(spec: &SweepSpecification) -> Result<ExpandedGrid, SweepError> {
    let axes: Vec<(&'static str, &[Value])> = spec
        .iter()
        .filter(|(name, _)| *name != OUTPUT_PATH)
        .collect();
    let total = checked_total(spec)?;
    let outputs = OutputPaths::resolve(spec.candidates(OUTPUT_PATH).unwrap_or_default(), total)?;
    let grid_hash = stable_hash_string(spec)?;
    debug!(total, axes = axes.len(), "expanding sweep grid");

    let user_configured: Vec<&'static str> = FIELDS
        .iter()
        .map(|field| field.name)
        .filter(|name| spec.is_user_configured(name))
        .collect();

    let mut entries = Vec::with_capacity(total);
    for idx in 0..total {
        let mut raw = point_at(&axes, idx);
        raw.insert(OUTPUT_PATH.to_string(), outputs.path(idx));
        let config = JobConfiguration::parse(&raw).map_err(|err| {
            debug!(index = idx, error = %err, "grid combination rejected");
            err
        })?;
        entries.push(GridEntry {
            config,
            user_configured: user_configured.clone(),
        });
    }

    info!(jobs = entries.len(), grid_hash = %grid_hash, "sweep grid expanded");
    Ok(ExpandedGrid { grid_hash, entries })
}

fn checked_total(spec: &SweepSpecification) -> Result<usize, SweepError> {
    let too_large = |required: String| {
        SweepError::Configuration(
            ErrorInfo::new(
                "grid_too_large",
                format!("sweep expands to {required} combinations, limit is {MAX_GRID_JOBS}"),
            )
            .with_context("required", required)
            .with_context("limit", MAX_GRID_JOBS.to_string())
            .with_hint("narrow the candidate lists or split the sweep"),
        )
    };
    match spec.combination_count() {
        Some(total) if total <= MAX_GRID_JOBS => Ok(total),
        Some(total) => Err(too_large(total.to_string())),
        None => Err(too_large("more than usize::MAX".to_string())),
    }
}

/// Combination number `idx` of the product; the last axis is the lowest digit.
fn point_at(axes: &[(&'static str, &[Value])], mut idx: usize) -> IndexMap<String, Value> {
    let mut digits = vec![0usize; axes.len()];
    for (digit, (_, values)) in digits.iter_mut().zip(axes).rev() {
        *digit = idx % values.len();
        idx /= values.len();
    }
    axes.iter()
        .zip(digits)
        .map(|((name, values), digit)| (name.to_string(), values[digit].clone()))
        .collect()
}

enum OutputPaths<'a> {
    Paired(&'a [Value]),
    Prefix(String),
}

impl<'a> OutputPaths<'a> {
    fn resolve(candidates: &'a [Value], total: usize) -> Result<Self, SweepError> {
        if candidates.len() == total {
            return Ok(OutputPaths::Paired(candidates));
        }
        if let [single] = candidates {
            let Value::String(prefix) = single else {
                return Err(SweepError::Validation(ValidationErrors::single(
                    FieldViolation::new(OUTPUT_PATH, format!("expected a string, got {single}")),
                )));
            };
            return Ok(OutputPaths::Prefix(prefix.trim_end_matches('/').to_string()));
        }
        Err(SweepError::Configuration(
            ErrorInfo::new(
                "output_path_count",
                format!(
                    "expected 1 or {total} output paths for {total} combinations, got {}",
                    candidates.len()
                ),
            )
            .with_context("required", total.to_string())
            .with_context("supplied", candidates.len().to_string())
            .with_hint("give a single directory prefix or one output path per combination"),
        ))
    }

    fn path(&self, idx: usize) -> Value {
        match self {
            OutputPaths::Paired(paths) => paths[idx].clone(),
            OutputPaths::Prefix(prefix) => Value::String(format!("{prefix}/output_{}", idx + 1)),
        }
    }
}
