use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the run completed and produced a report (match count is irrelevant)
    Success = 0,
    /// Zero targets could be retrieved from the organization
    NoTargetsRetrieved = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (auth error, enumeration failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoTargetsRetrieved => write!(f, "No Targets Retrieved (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Run-fatal errors for the AI-BOM scan.
///
/// Anything scoped to a single target is never represented here; per-target
/// failures are recorded as `TargetFailure` outcomes and the run continues.
/// Uses thiserror to derive Display and Error traits automatically.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Missing credentials: {variable} is not set\n\n💡 Hint: Export {variable} before running, e.g. `export {variable}=...`")]
    MissingCredentials { variable: String },

    #[error("Missing scan scope: neither SNYK_ORG_ID nor SNYK_GROUP_ID is set\n\n💡 Hint: Export SNYK_ORG_ID for a single organization, or SNYK_GROUP_ID to scan every organization in a group")]
    MissingScope,

    #[error("Authentication failed (HTTP {status})\nDetails: {details}\n\n💡 Hint: Verify that SNYK_TOKEN is valid and grants access to the organization")]
    Auth { status: u16, details: String },

    #[error("Failed to enumerate targets: {details}\n\n💡 Hint: Check network connectivity and the SNYK_API_URL / SNYK_ORG_ID values")]
    TargetEnumeration { details: String },

    #[error("Failed to load policy file: {path}\nDetails: {details}\n\n💡 Hint: The policy file must be YAML with a top-level `reject` list of model names")]
    PolicyFile { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}
