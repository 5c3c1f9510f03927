use std::collections::BTreeSet;

use crate::scanning::domain::ScanResult;
use crate::scanning::services::{extract_components, GroupBy};

/// Internal component kinds with dedicated display labels.
pub const KNOWN_KINDS: [&str; 4] = ["machine-learning-model", "data", "library", "application"];

const KIND_UNKNOWN: &str = "unknown";

/// One row of the component inventory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub component: String,
    pub target: String,
    /// Raw internal kind (`machine-learning-model`, `library`, ...).
    pub kind: String,
    pub locations: Vec<String>,
}

/// Resolves a comma-separated `--include` value into internal kinds.
///
/// Accepts the user-friendly spellings ("ML Model", "Datasets", "apps", ...)
/// as well as the internal kind names; returns the resolved set together
/// with the inputs that matched nothing, so the caller can warn about them.
pub fn resolve_include_kinds(raw: &str) -> (BTreeSet<String>, Vec<String>) {
    let mut kinds = BTreeSet::new();
    let mut unknown = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let normalized = entry.to_lowercase();
        let internal = match normalized.as_str() {
            "ml model" | "ml models" | "machine learning model" | "machine learning models" => {
                Some("machine-learning-model")
            }
            "dataset" | "datasets" | "data" => Some("data"),
            "library" | "libraries" => Some("library"),
            "application" | "applications" | "app" | "apps" => Some("application"),
            other if KNOWN_KINDS.contains(&other) => Some(other),
            _ => None,
        };
        match internal {
            Some(kind) => {
                kinds.insert(kind.to_string());
            }
            None => unknown.push(entry.to_string()),
        }
    }

    (kinds, unknown)
}

/// Display label for a component kind ("ML Model", "Dataset", ...).
pub fn kind_label(kind: &str) -> String {
    match kind {
        "machine-learning-model" => "ML Model".to_string(),
        "data" => "Dataset".to_string(),
        "library" => "Library".to_string(),
        "application" => "Application".to_string(),
        other => title_case(other),
    }
}

/// Breakdown-table label for a component kind ("🧠 ML Models", ...).
pub fn kind_breakdown_label(kind: &str) -> String {
    match kind {
        "machine-learning-model" => "🧠 ML Models".to_string(),
        "data" => "📊 Datasets".to_string(),
        "library" => "📚 Libraries".to_string(),
        "application" => "🔧 Applications".to_string(),
        other => format!("🔧 {}", title_case(other)),
    }
}

/// Renders a location list for one table cell: at most `max` entries
/// joined with `; `, the overflow summarized as a count.
pub fn format_locations(locations: &[String], max: usize) -> String {
    if locations.is_empty() {
        return "No source locations".to_string();
    }
    let shown = locations.len().min(max);
    let mut out = locations[..shown].join("; ");
    if locations.len() > max {
        out.push_str(&format!(" ... and {} more", locations.len() - max));
    }
    out
}

/// Builds the flat inventory across all retrieved documents.
///
/// Rows are filtered to `include` kinds when given, then sorted by the
/// grouping's primary key: component-first for `GroupBy::Component`,
/// target-first for `GroupBy::Repo`. Case-insensitive on both keys.
pub fn inventory_rows(
    results: &[ScanResult],
    include: Option<&BTreeSet<String>>,
    group_by: GroupBy,
) -> Vec<InventoryRow> {
    let mut rows: Vec<InventoryRow> = results
        .iter()
        .flat_map(|result| {
            extract_components(result.aibom_data())
                .into_iter()
                .map(|component| InventoryRow {
                    component: component.name().to_string(),
                    target: result.target_name().to_string(),
                    kind: component.kind().unwrap_or(KIND_UNKNOWN).to_string(),
                    locations: component.locations().to_vec(),
                })
        })
        .filter(|row| include.map_or(true, |kinds| kinds.contains(&row.kind)))
        .collect();

    rows.sort_by(|a, b| {
        let key = |row: &InventoryRow| match group_by {
            GroupBy::Component => (
                row.component.to_lowercase(),
                row.target.to_lowercase(),
                row.component.clone(),
                row.target.clone(),
            ),
            GroupBy::Repo => (
                row.target.to_lowercase(),
                row.component.to_lowercase(),
                row.target.clone(),
                row.component.clone(),
            ),
        };
        key(a).cmp(&key(b))
    });
    rows
}

/// Per-kind component counts over the (already filtered) inventory rows,
/// sorted by kind.
pub fn kind_counts(rows: &[InventoryRow]) -> Vec<(String, usize)> {
    let mut counts: std::collections::BTreeMap<String, usize> = Default::default();
    for row in rows {
        *counts.entry(row.kind.clone()).or_default() += 1;
    }
    counts.into_iter().collect()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
