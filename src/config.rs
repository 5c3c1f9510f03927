//! Configuration for aibom-scan.
//!
//! Credentials and endpoint settings come from the process environment;
//! orchestration tunables carry defaults and are plain values passed into
//! the pipeline, never module-lifetime globals.

use std::env;
use std::time::Duration;

use crate::shared::error::ScanError;
use crate::shared::Result;

const DEFAULT_API_URL: &str = "https://api.snyk.io";
const DEFAULT_API_VERSION: &str = "2025-07-22";

/// What the run enumerates: one organization, or every organization in a
/// group. When both environment variables are set, the group wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanScope {
    Organization(String),
    Group(String),
}

/// Immutable API configuration shared read-only across all target pipelines.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: String,
    pub scope: ScanScope,
    pub api_token: String,
    pub api_version: String,
}

impl ApiConfig {
    /// Builds the configuration from environment variables.
    ///
    /// `SNYK_TOKEN` plus one of `SNYK_ORG_ID` / `SNYK_GROUP_ID` are
    /// required; `SNYK_API_URL` and `SNYK_API_VERSION` are optional
    /// overrides for alternate deployments.
    ///
    /// # Errors
    /// Returns `ScanError::MissingCredentials` when the token is absent and
    /// `ScanError::MissingScope` when neither scope variable is set.
    pub fn from_env() -> Result<Self> {
        let api_token = require_env("SNYK_TOKEN")?;
        let scope = match optional_env("SNYK_GROUP_ID") {
            Some(group_id) => ScanScope::Group(group_id),
            None => match optional_env("SNYK_ORG_ID") {
                Some(org_id) => ScanScope::Organization(org_id),
                None => return Err(ScanError::MissingScope.into()),
            },
        };
        let api_url = optional_env("SNYK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_version =
            optional_env("SNYK_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            scope,
            api_token,
            api_version,
        })
    }

    /// First page of a group's paginated organizations collection.
    pub fn group_orgs_url(&self, group_id: &str) -> String {
        format!(
            "{}/rest/groups/{}/orgs?version={}&limit=100",
            self.api_url,
            urlencoding::encode(group_id),
            urlencoding::encode(&self.api_version)
        )
    }

    /// First page of an organization's paginated targets collection.
    pub fn targets_url(&self, org_id: &str) -> String {
        format!(
            "{}/rest/orgs/{}/targets?version={}&limit=100",
            self.api_url,
            urlencoding::encode(org_id),
            urlencoding::encode(&self.api_version)
        )
    }

    /// Job creation endpoint, scoped to the target's organization.
    pub fn job_creation_url(&self, org_id: &str) -> String {
        format!(
            "{}/rest/orgs/{}/ai_boms?version={}",
            self.api_url,
            urlencoding::encode(org_id),
            urlencoding::encode(&self.api_version)
        )
    }

    /// Job status/result endpoint for one job id.
    pub fn job_url(&self, org_id: &str, job_id: &str) -> String {
        format!(
            "{}/rest/orgs/{}/ai_bom_jobs/{}?version={}",
            self.api_url,
            urlencoding::encode(org_id),
            urlencoding::encode(job_id),
            urlencoding::encode(&self.api_version)
        )
    }

    /// Resolves a relative continuation link against the base URL.
    pub fn resolve_link(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}{}", self.api_url, link)
        }
    }
}

fn require_env(variable: &str) -> Result<String> {
    optional_env(variable).ok_or_else(|| {
        ScanError::MissingCredentials {
            variable: variable.to_string(),
        }
        .into()
    })
}

fn optional_env(variable: &str) -> Option<String> {
    env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Tunables for the per-target job pipeline.
///
/// The poll schedule grows exponentially from the initial delay up to the
/// cap; `max_poll_attempts` bounds how long one target can hold a worker.
#[derive(Debug, Clone)]
pub struct ScanTuning {
    /// Maximum number of concurrently in-flight target pipelines.
    pub max_concurrency: usize,
    pub poll_initial_delay: Duration,
    pub poll_max_delay: Duration,
    pub poll_backoff_factor: f64,
    pub max_poll_attempts: u32,
}

impl Default for ScanTuning {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            poll_initial_delay: Duration::from_secs(2),
            poll_max_delay: Duration::from_secs(10),
            poll_backoff_factor: 1.5,
            max_poll_attempts: 60,
        }
    }
}

impl ScanTuning {
    /// Next delay in the schedule after the given one.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let grown = current.mul_f64(self.poll_backoff_factor);
        grown.min(self.poll_max_delay)
    }
}
