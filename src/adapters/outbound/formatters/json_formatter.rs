use crate::ports::outbound::ReportFormatter;
use crate::scanning::domain::{ScanResult, ScanSummary};
use crate::scanning::services::GroupBy;
use crate::shared::Result;
use serde::Serialize;
use serde_json::Value;

/// JsonReportFormatter adapter for the machine-readable output payload
///
/// Emits one entry per target for which a document was retrieved, in the
/// deterministic order the use case established. The payload shape is
/// fixed regardless of the requested grouping.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonPayload<'a> {
    all_aibom_data: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    target_name: &'a str,
    aibom_data: &'a Value,
}

impl ReportFormatter for JsonReportFormatter {
    fn format(
        &self,
        results: &[ScanResult],
        _summary: &ScanSummary,
        _group_by: GroupBy,
    ) -> Result<String> {
        let payload = JsonPayload {
            all_aibom_data: results
                .iter()
                .map(|result| JsonEntry {
                    target_name: result.target_name(),
                    aibom_data: result.aibom_data(),
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&payload)?)
    }
}
