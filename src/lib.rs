//! aibom-scan - AI component audit tool for Snyk organizations
//!
//! This library enumerates the git-hosted targets of a Snyk organization,
//! generates an AI Bill of Materials (AI-BOM) for each via the Snyk REST API,
//! and reports which repositories use which AI components. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use aibom_scan::prelude::*;
//! use aibom_scan::config::{ApiConfig, ScanTuning};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let api = SnykAibomClient::new(ApiConfig::from_env()?)?;
//! let progress_reporter = StderrProgressReporter::new(false);
//!
//! // Create use case
//! let use_case = ScanTargetsUseCase::new(api, progress_reporter, ScanTuning::default());
//!
//! // Execute
//! let request = ScanRequest::search(vec!["deepseek".to_string()]);
//! let report = use_case.execute(request).await?;
//!
//! // Format output
//! let formatter = JsonReportFormatter::new();
//! let output = formatter.format(&report.results, &report.summary, GroupBy::Component)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod policy;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemWriter;
    pub use crate::adapters::outbound::formatters::{HtmlReportFormatter, JsonReportFormatter};
    pub use crate::adapters::outbound::network::SnykAibomClient;
    pub use crate::application::dto::{ScanMode, ScanReport, ScanRequest};
    pub use crate::application::use_cases::ScanTargetsUseCase;
    pub use crate::ports::outbound::{
        AibomApi, OutputPresenter, ProgressReporter, ReportFormatter,
    };
    pub use crate::scanning::domain::{
        Component, JobHandle, JobState, RepoType, ScanResult, ScanSummary, Target, TargetFailure,
        TargetOutcome,
    };
    pub use crate::scanning::services::{GroupBy, GroupedMatches};
    pub use crate::shared::Result;
}
