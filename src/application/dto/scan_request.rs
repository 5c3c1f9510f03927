use std::collections::BTreeSet;

/// Matching behavior for one run, selected once at the boundary.
#[derive(Debug, Clone)]
pub enum ScanMode {
    /// Keyword search: OR-joined, case-insensitive substring terms.
    Search { terms: Vec<String> },
    /// Full inventory scan, optionally checked against a reject-list
    /// policy (normalized model names).
    Inventory {
        rejected_models: Option<BTreeSet<String>>,
    },
}

/// ScanRequest - Internal request DTO for the scan-targets use case
///
/// This DTO represents the internal request structure used within
/// the application layer. It may differ from the external CLI surface.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub mode: ScanMode,
}

impl ScanRequest {
    pub fn search(terms: Vec<String>) -> Self {
        Self {
            mode: ScanMode::Search { terms },
        }
    }

    pub fn inventory(rejected_models: Option<BTreeSet<String>>) -> Self {
        Self {
            mode: ScanMode::Inventory { rejected_models },
        }
    }
}
