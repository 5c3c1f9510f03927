use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use super::Target;

/// The canonical per-target unit consumed by the aggregator.
///
/// One `ScanResult` exists per target whose document was retrieved.
/// `matched_terms` may be empty here; empty-match results are dropped
/// before match reports are built, but their documents still appear in
/// the JSON output payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    target_name: String,
    matched_terms: BTreeSet<String>,
    aibom_data: Value,
}

impl ScanResult {
    pub fn new(target_name: String, matched_terms: BTreeSet<String>, aibom_data: Value) -> Self {
        Self {
            target_name,
            matched_terms,
            aibom_data,
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn matched_terms(&self) -> &BTreeSet<String> {
        &self.matched_terms
    }

    pub fn aibom_data(&self) -> &Value {
        &self.aibom_data
    }

    /// Whether this result belongs in a match report.
    pub fn has_matches(&self) -> bool {
        !self.matched_terms.is_empty()
    }
}

/// Summary counts for one run.
///
/// `total_targets` is captured once, before eligibility filtering, and is
/// never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub total_targets: usize,
    pub eligible_targets: usize,
    pub succeeded_targets: usize,
    pub matched_targets: usize,
    pub failed_targets: usize,
}

/// Terminal failure of one target's pipeline.
///
/// All variants are equivalent at the aggregation boundary ("no document
/// available for this target"); the distinction only surfaces in debug
/// diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetFailure {
    #[error("job submission failed: {details}")]
    Submission { details: String },

    #[error("generation job errored: {details}")]
    JobErrored { details: String },

    #[error("gave up waiting for job after {attempts} polls")]
    PollTimeout { attempts: u32 },

    #[error("document fetch failed after job finished: {details}")]
    Fetch { details: String },
}

/// Outcome of one target's pipeline: a raw document, or a recorded failure.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub target: Target,
    pub document: Result<Value, TargetFailure>,
}
