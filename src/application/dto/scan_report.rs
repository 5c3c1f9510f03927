use crate::scanning::domain::{ScanResult, ScanSummary, TargetFailure};

/// One failed target with its recorded reason.
#[derive(Debug, Clone)]
pub struct FailedTarget {
    pub target_name: String,
    pub failure: TargetFailure,
}

/// ScanReport - Response DTO for the scan-targets use case
///
/// `results` holds one entry per target whose document was retrieved, in
/// deterministic (name-sorted) order; `failures` records every target
/// that produced no document. Whether a target failed or simply had no
/// match is distinguishable only through `failures`, never through
/// `results` itself.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub results: Vec<ScanResult>,
    pub failures: Vec<FailedTarget>,
}

impl ScanReport {
    /// Results that belong in a match report (non-empty matched terms).
    pub fn matches(&self) -> Vec<&ScanResult> {
        self.results.iter().filter(|r| r.has_matches()).collect()
    }
}
