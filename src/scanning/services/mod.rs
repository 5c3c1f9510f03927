/// Domain services - Pure logic over extracted documents and results
pub mod extractor;
pub mod inventory;
pub mod matcher;
pub mod report;

pub use extractor::extract_components;
pub use inventory::{
    format_locations, inventory_rows, kind_breakdown_label, kind_counts, kind_label,
    resolve_include_kinds, InventoryRow,
};
pub use matcher::{match_keywords, match_policy};
pub use report::{
    group_by_component, group_by_repo, grouped_matches, match_pairs, GroupBy, GroupedMatches,
};
