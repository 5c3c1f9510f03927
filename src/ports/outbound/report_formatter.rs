use crate::scanning::domain::{ScanResult, ScanSummary};
use crate::scanning::services::GroupBy;
use crate::shared::Result;

/// ReportFormatter port for serializing a finished run
///
/// Implementations turn the per-target result set into one output
/// document (JSON payload, HTML report, ...).
pub trait ReportFormatter {
    /// Formats the result set into the target representation
    ///
    /// # Arguments
    /// * `results` - Per-target results in deterministic order
    /// * `summary` - Run summary counts
    /// * `group_by` - Requested grouping for match sections
    ///
    /// # Returns
    /// The formatted document as a string
    fn format(
        &self,
        results: &[ScanResult],
        summary: &ScanSummary,
        group_by: GroupBy,
    ) -> Result<String>;
}
