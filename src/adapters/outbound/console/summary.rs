use std::collections::BTreeSet;

use owo_colors::OwoColorize;

use crate::application::dto::ScanReport;
use crate::scanning::services::{
    format_locations, grouped_matches, inventory_rows, kind_breakdown_label, kind_counts,
    GroupBy, InventoryRow,
};

/// Console rendering for the final report, written to stdout.
///
/// Progress goes to stderr; only the report itself lands on stdout.

const RULE: &str = "==================================================";

/// Locations shown per table cell before the rest collapses to a count.
const CONSOLE_MAX_LOCATIONS: usize = 3;

/// Renders the closing report for a keyword search run.
pub fn print_search_report(report: &ScanReport, search_display: &str, group_by: GroupBy) {
    println!("{}", "Scan Complete".green().bold());
    println!("{}", RULE.blue());

    let matches: Vec<_> = report.matches().into_iter().cloned().collect();
    if matches.is_empty() {
        println!(
            "ℹ️  No matches for {} found in any scanned target.",
            search_display
        );
    } else {
        let target_word = if report.summary.matched_targets == 1 {
            "target"
        } else {
            "targets"
        };
        println!(
            "{} Found matches in {} {}:",
            "✅".green(),
            report.summary.matched_targets,
            target_word
        );
        for (key, members) in grouped_matches(&matches, group_by) {
            println!("   • {} ({})", key.yellow(), members.join(","));
        }
    }

    print_run_counts(report);
    println!("{}", RULE.blue());
}

/// Renders the closing report for an inventory scan run.
pub fn print_inventory_report(
    report: &ScanReport,
    had_policy: bool,
    group_by: GroupBy,
    include: Option<&BTreeSet<String>>,
) {
    println!("{}", "🎉 Scan Complete!".green().bold());
    println!("{}", RULE.blue());

    let rows = inventory_rows(&report.results, include, group_by);
    if rows.is_empty() {
        println!("No AI components found across any targets.");
    } else {
        match group_by {
            GroupBy::Repo => println!(
                "{}",
                "🤖 AI Components Summary - Grouped by Repository 🎯"
                    .green()
                    .bold()
            ),
            GroupBy::Component => println!(
                "{}",
                "🤖 AI Components Summary - All Targets 🎯".green().bold()
            ),
        }
        println!();
        print!("{}", render_inventory_table(&rows, group_by));

        println!();
        println!(
            "{} Total AI Components Found: {}",
            "📈".green(),
            rows.len()
        );

        println!();
        println!("{}", "📊 Component Types Breakdown:".cyan().bold());
        for (kind, count) in kind_counts(&rows) {
            println!("   {}: {}", kind_breakdown_label(&kind), count);
        }
    }

    if had_policy {
        print_policy_section(report, group_by);
    }

    print_run_counts(report);
    println!("{}", RULE.blue());
}

/// Renders the inventory as an aligned text table.
///
/// Component-first grouping lists every row in full; repository-first
/// grouping prints each repository name only on its first row.
fn render_inventory_table(rows: &[InventoryRow], group_by: GroupBy) -> String {
    let mut cells: Vec<[String; 4]> = Vec::with_capacity(rows.len() + 1);
    let header = match group_by {
        GroupBy::Repo => ["Repository", "AI Component", "Type", "Locations"],
        GroupBy::Component => ["AI Component", "Target Name", "Type", "Locations"],
    };
    cells.push(header.map(String::from));

    let mut previous_target: Option<&str> = None;
    for row in rows {
        let kind = crate::scanning::services::kind_label(&row.kind);
        let locations = format_locations(&row.locations, CONSOLE_MAX_LOCATIONS);
        match group_by {
            GroupBy::Repo => {
                let repo = if previous_target == Some(row.target.as_str()) {
                    String::new()
                } else {
                    row.target.clone()
                };
                previous_target = Some(row.target.as_str());
                cells.push([repo, row.component.clone(), kind, locations]);
            }
            GroupBy::Component => {
                cells.push([row.component.clone(), row.target.clone(), kind, locations]);
            }
        }
    }

    let mut widths = [0usize; 4];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (index, row) in cells.iter().enumerate() {
        let mut line = String::new();
        for (column, cell) in row.iter().enumerate() {
            if column > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            if column < 3 {
                line.extend(std::iter::repeat(' ').take(widths[column] - cell.chars().count()));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
        if index == 0 {
            let total: usize = widths.iter().sum::<usize>() + 2 * 3;
            out.extend(std::iter::repeat('-').take(total));
            out.push('\n');
        }
    }
    out
}

fn print_policy_section(report: &ScanReport, group_by: GroupBy) {
    println!();
    println!("{}", "🚫 Policy Validation Results".red().bold());

    let violations: Vec<_> = report.matches().into_iter().cloned().collect();
    if violations.is_empty() {
        println!(
            "{} Policy Compliance: No forbidden models found in the scan!",
            "✅".green()
        );
        println!("📋 All models in use comply with the provided policy.");
        return;
    }

    let violation_count: usize = violations
        .iter()
        .map(|result| result.matched_terms().len())
        .sum();
    for (key, members) in grouped_matches(&violations, group_by) {
        println!("   • {} ({})", key.red(), members.join(","));
    }
    println!(
        "{} Policy Violation: {} forbidden model(s) found!",
        "❌".red(),
        violation_count
    );
}

fn print_run_counts(report: &ScanReport) {
    let summary = &report.summary;
    println!();
    println!(
        "Targets: {} total, {} eligible, {} scanned, {} failed",
        summary.total_targets,
        summary.eligible_targets,
        summary.succeeded_targets,
        summary.failed_targets
    );
}
