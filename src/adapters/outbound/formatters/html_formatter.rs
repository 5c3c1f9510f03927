use crate::ports::outbound::ReportFormatter;
use crate::scanning::domain::{ScanResult, ScanSummary};
use crate::scanning::services::{
    format_locations, grouped_matches, inventory_rows, kind_breakdown_label, kind_counts,
    kind_label, GroupBy,
};
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Locations shown per table cell before the rest collapses to a count.
const HTML_MAX_LOCATIONS: usize = 5;

/// HtmlReportFormatter adapter for the standalone HTML report
///
/// Assembles the report with plain string building; no template engine.
pub struct HtmlReportFormatter {
    /// Restricts the component inventory to these kinds when set.
    include: Option<BTreeSet<String>>,
}

impl HtmlReportFormatter {
    pub fn new() -> Self {
        Self { include: None }
    }

    pub fn with_include(include: Option<BTreeSet<String>>) -> Self {
        Self { include }
    }
}

impl Default for HtmlReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlReportFormatter {
    fn format(
        &self,
        results: &[ScanResult],
        summary: &ScanSummary,
        group_by: GroupBy,
    ) -> Result<String> {
        let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>AI-BOM Scan Report</title>")?;
        writeln!(html, "<style>")?;
        writeln!(
            html,
            "body {{ font-family: sans-serif; margin: 2em; }} \
             table {{ border-collapse: collapse; margin: 1em 0; }} \
             th, td {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }} \
             th {{ background: #f0f0f0; }} \
             td.locations {{ color: #666; font-size: 0.9em; }}"
        )?;
        writeln!(html, "</style>")?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<h1>🤖 AI-BOM Scan Report</h1>")?;
        writeln!(html, "<p>Generated: {}</p>", generated)?;

        writeln!(html, "<h2>Summary</h2>")?;
        writeln!(html, "<ul>")?;
        writeln!(html, "<li>Total targets: {}</li>", summary.total_targets)?;
        writeln!(
            html,
            "<li>Eligible targets: {}</li>",
            summary.eligible_targets
        )?;
        writeln!(
            html,
            "<li>Documents retrieved: {}</li>",
            summary.succeeded_targets
        )?;
        writeln!(html, "<li>Matched targets: {}</li>", summary.matched_targets)?;
        writeln!(html, "<li>Failed targets: {}</li>", summary.failed_targets)?;
        writeln!(html, "</ul>")?;

        let groups = grouped_matches(results, group_by);
        let (key_header, member_header) = match group_by {
            GroupBy::Component => ("Component / Term", "Targets"),
            GroupBy::Repo => ("Repository", "Components / Terms"),
        };

        writeln!(html, "<h2>Matches</h2>")?;
        if groups.is_empty() {
            writeln!(html, "<p>No matches found in any scanned target.</p>")?;
        } else {
            writeln!(html, "<table>")?;
            writeln!(
                html,
                "<tr><th>{}</th><th>{}</th></tr>",
                key_header, member_header
            )?;
            for (key, members) in &groups {
                writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(key),
                    escape_html(&members.join(", "))
                )?;
            }
            writeln!(html, "</table>")?;
        }

        self.write_inventory(&mut html, results, group_by)?;

        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }
}

impl HtmlReportFormatter {
    /// Writes the full component inventory: a per-kind breakdown followed
    /// by one row per component occurrence with its source locations.
    fn write_inventory(
        &self,
        html: &mut String,
        results: &[ScanResult],
        group_by: GroupBy,
    ) -> Result<()> {
        writeln!(html, "<h2>AI Component Inventory</h2>")?;

        let rows = inventory_rows(results, self.include.as_ref(), group_by);
        if rows.is_empty() {
            writeln!(
                html,
                "<p>No AI components were detected in any of the scanned targets.</p>"
            )?;
            return Ok(());
        }

        writeln!(html, "<p>Total AI components found: {}</p>", rows.len())?;

        writeln!(html, "<h3>📊 Component Types Breakdown</h3>")?;
        writeln!(html, "<ul>")?;
        for (kind, count) in kind_counts(&rows) {
            writeln!(
                html,
                "<li>{}: {}</li>",
                escape_html(&kind_breakdown_label(&kind)),
                count
            )?;
        }
        writeln!(html, "</ul>")?;

        writeln!(html, "<table>")?;
        match group_by {
            GroupBy::Repo => writeln!(
                html,
                "<tr><th>Repository</th><th>AI Component</th><th>Type</th><th>Locations</th></tr>"
            )?,
            GroupBy::Component => writeln!(
                html,
                "<tr><th>AI Component</th><th>Target Name</th><th>Type</th><th>Locations</th></tr>"
            )?,
        }
        for row in &rows {
            let kind = escape_html(&kind_label(&row.kind));
            let locations = escape_html(&format_locations(&row.locations, HTML_MAX_LOCATIONS));
            let (first, second) = match group_by {
                GroupBy::Repo => (&row.target, &row.component),
                GroupBy::Component => (&row.component, &row.target),
            };
            writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"locations\">{}</td></tr>",
                escape_html(first),
                escape_html(second),
                kind,
                locations
            )?;
        }
        writeln!(html, "</table>")?;

        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn sample_results() -> Vec<ScanResult> {
        let mut terms = BTreeSet::new();
        terms.insert("deepseek".to_string());
        vec![ScanResult::new(
            "org/repo".to_string(),
            terms,
            json!({"components": [
                {
                    "name": "deepseek-coder",
                    "type": "machine-learning-model",
                    "evidence": {"occurrences": [
                        {"location": "src/agent.py", "line": 42}
                    ]}
                },
                {"name": "langchain", "type": "library"}
            ]}),
        )]
    }

    fn sample_summary() -> ScanSummary {
        ScanSummary {
            total_targets: 5,
            eligible_targets: 4,
            succeeded_targets: 1,
            matched_targets: 1,
            failed_targets: 0,
        }
    }

    #[test]
    fn test_html_structure() {
        let formatter = HtmlReportFormatter::new();
        let html = formatter
            .format(&sample_results(), &sample_summary(), GroupBy::Component)
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Total targets: 5"));
        assert!(html.contains("deepseek"));
        assert!(html.contains("org/repo"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_inventory_rows_carry_type_and_locations() {
        let formatter = HtmlReportFormatter::new();
        let html = formatter
            .format(&sample_results(), &sample_summary(), GroupBy::Component)
            .unwrap();

        assert!(html.contains("Total AI components found: 2"));
        assert!(html.contains("<td>ML Model</td>"));
        assert!(html.contains("src/agent.py:42"));
        assert!(html.contains("No source locations"));
        assert!(html.contains("🧠 ML Models: 1"));
        assert!(html.contains("📚 Libraries: 1"));
    }

    #[test]
    fn test_repo_grouping_puts_repository_first() {
        let formatter = HtmlReportFormatter::new();
        let html = formatter
            .format(&sample_results(), &sample_summary(), GroupBy::Repo)
            .unwrap();

        assert!(html.contains("<tr><th>Repository</th><th>AI Component</th>"));
        assert!(html.contains("<tr><td>org/repo</td><td>deepseek-coder</td>"));
    }

    #[test]
    fn test_include_filter_limits_inventory() {
        let include: BTreeSet<String> =
            ["library".to_string()].into_iter().collect();
        let formatter = HtmlReportFormatter::with_include(Some(include));
        let html = formatter
            .format(&sample_results(), &sample_summary(), GroupBy::Component)
            .unwrap();

        assert!(html.contains("Total AI components found: 1"));
        assert!(html.contains("langchain"));
        assert!(!html.contains("<td>ML Model</td>"));
    }

    #[test]
    fn test_html_escaping() {
        assert_eq!(
            escape_html("<script>&\"x\"</script>"),
            "&lt;script&gt;&amp;&quot;x&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_no_matches_section() {
        let formatter = HtmlReportFormatter::new();
        let html = formatter
            .format(&[], &ScanSummary::default(), GroupBy::Repo)
            .unwrap();
        assert!(html.contains("No matches found"));
        assert!(html.contains("No AI components were detected"));
    }
}
