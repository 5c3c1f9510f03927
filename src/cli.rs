use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::scanning::services::GroupBy;

/// Audit Snyk organization targets for AI components via AI-BOM generation
#[derive(Parser, Debug)]
#[command(name = "aibom-scan")]
#[command(version)]
#[command(about = "Audit Snyk organization targets for AI components", long_about = None)]
pub struct Cli {
    /// Enable debug output (per-target diagnostics and skip reasons)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search all targets' AI-BOMs for keywords (comma-separated, OR semantics)
    Search {
        /// The keyword(s) to search for, comma-separated for multiple terms
        terms: String,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Generate AI-BOMs for all targets and report their AI components
    Scan {
        /// Path to a YAML policy file with a `reject` list of forbidden models
        #[arg(long, value_name = "PATH")]
        policy_file: Option<PathBuf>,

        /// Only include these component types, comma-separated
        /// (e.g. 'ML Models,Datasets,Libraries,Applications')
        #[arg(long, short = 'i', value_name = "TYPES")]
        include: Option<String>,

        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// Output file path for the JSON report
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Output file path for the HTML report
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Group output by 'component' (default) or 'repo'
    #[arg(long, default_value = "component")]
    pub group_by: GroupBy,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Splits a comma-separated term list, dropping blanks.
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human formatting of the search terms for the run banner.
pub fn search_display(terms: &[String]) -> String {
    if terms.len() == 1 {
        format!("'{}'", terms[0])
    } else {
        let quoted: Vec<String> = terms.iter().map(|term| format!("'{}'", term)).collect();
        format!("any of: {}", quoted.join(", "))
    }
}
