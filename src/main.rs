use std::collections::BTreeSet;
use std::process;

use aibom_scan::adapters::outbound::console::summary;
use aibom_scan::cli::{self, Cli, Command, OutputOptions};
use aibom_scan::config::{ApiConfig, ScanTuning};
use aibom_scan::policy::load_policy_from_path;
use aibom_scan::prelude::*;
use aibom_scan::scanning::services::resolve_include_kinds;
use aibom_scan::shared::error::ExitCode;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments (clap exits with code 2 on bad input)
    let args = Cli::parse_args();

    // Build the scan request from the selected subcommand. The policy file
    // and the include filter are resolved before any network work so bad
    // input fails fast.
    let (request, search_display, output, had_policy, include_kinds) = match args.command {
        Command::Search { terms, output } => {
            let terms = cli::parse_terms(&terms);
            if terms.is_empty() {
                eprintln!("❌ No search terms provided. Pass at least one non-empty term.");
                return Ok(ExitCode::InvalidArguments);
            }
            let display = cli::search_display(&terms);
            (ScanRequest::search(terms), Some(display), output, false, None)
        }
        Command::Scan {
            policy_file,
            include,
            output,
        } => {
            let include_kinds = match include {
                Some(raw) => {
                    let (kinds, unknown) = resolve_include_kinds(&raw);
                    for entry in &unknown {
                        eprintln!(
                            "⚠️  Warning: Unknown component type '{}' will be ignored",
                            entry
                        );
                    }
                    if kinds.is_empty() {
                        eprintln!("❌ No valid component types specified.");
                        return Ok(ExitCode::InvalidArguments);
                    }
                    Some(kinds)
                }
                None => None,
            };
            let rejected_models = match policy_file {
                Some(path) => Some(load_policy_from_path(&path)?),
                None => None,
            };
            let had_policy = rejected_models.is_some();
            (
                ScanRequest::inventory(rejected_models),
                None,
                output,
                had_policy,
                include_kinds,
            )
        }
    };

    // Create adapters (Dependency Injection)
    let config = ApiConfig::from_env()?;
    let api = SnykAibomClient::new(config)?;
    let progress_reporter = StderrProgressReporter::new(args.debug);

    match &search_display {
        Some(display) => eprintln!("🚀 Starting AI-BOM scan, searching for {}...", display),
        None => eprintln!("🚀 Starting AI-BOM scan..."),
    }

    // Create use case with injected dependencies and execute
    let use_case = ScanTargetsUseCase::new(api, progress_reporter, ScanTuning::default());
    let report = use_case.execute(request).await?;

    if report.summary.total_targets == 0 {
        eprintln!("❌ Could not retrieve any targets for the organization.");
        return Ok(ExitCode::NoTargetsRetrieved);
    }

    // Console report on stdout
    match &search_display {
        Some(display) => summary::print_search_report(&report, display, output.group_by),
        None => summary::print_inventory_report(
            &report,
            had_policy,
            output.group_by,
            include_kinds.as_ref(),
        ),
    }

    write_reports(&report, &output, include_kinds)?;

    Ok(ExitCode::Success)
}

/// Writes the optional JSON and HTML report files.
fn write_reports(
    report: &ScanReport,
    output: &OutputOptions,
    include_kinds: Option<BTreeSet<String>>,
) -> Result<()> {
    if let Some(path) = &output.json {
        let formatter = JsonReportFormatter::new();
        let content = formatter.format(&report.results, &report.summary, output.group_by)?;
        FileSystemWriter::new(path.clone()).present(&content)?;
        eprintln!("📄 JSON report saved to: {}", path.display());
    }

    if let Some(path) = &output.html {
        let formatter = HtmlReportFormatter::with_include(include_kinds);
        let content = formatter.format(&report.results, &report.summary, output.group_by)?;
        FileSystemWriter::new(path.clone()).present(&content)?;
        eprintln!("🌐 HTML report saved to: {}", path.display());
    }

    Ok(())
}
