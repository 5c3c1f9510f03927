use crate::scanning::domain::{JobHandle, JobState, Target};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// AibomApi port for the AI-BOM generation platform.
///
/// Abstracts the four vendor endpoints the pipeline needs: target
/// enumeration, job submission, job status, and result retrieval.
///
/// # Async Support
/// All methods are async; implementations must be `Send + Sync` so many
/// target pipelines can share one client read-only.
#[async_trait]
pub trait AibomApi: Send + Sync {
    /// Fetches every target of the organization, exhausting pagination.
    ///
    /// The returned order is the platform's enumeration order, pre-filter.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Credentials are rejected (never retried)
    /// - A page fetch keeps failing after bounded retries
    async fn list_targets(&self) -> Result<Vec<Target>>;

    /// Submits a BOM generation job for one target.
    ///
    /// # Errors
    /// Returns an error for any non-2xx response, including 422 for
    /// targets the generator cannot process.
    async fn submit_job(&self, target: &Target) -> Result<JobHandle>;

    /// Queries the current status of a generation job.
    async fn job_status(&self, job: &JobHandle) -> Result<JobState>;

    /// Retrieves the finished document for a job.
    ///
    /// Only meaningful once the job reported `finished`; a failure here
    /// is a data-integrity problem distinct from a timeout.
    async fn fetch_document(&self, job: &JobHandle) -> Result<Value>;
}
