/// Handle for a server-side AI-BOM generation job.
///
/// Returned by job submission; the job id is the key for both the status
/// and result endpoints. Exists only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: String,
    /// Organization the job was created under; job endpoints are org-scoped.
    pub org_id: String,
    /// Status reported in the submission response; a fast job may already
    /// be finished before the first poll.
    pub initial_status: JobState,
}

/// Status of a generation job as reported by the status endpoint.
///
/// `Finished` and `Errored` are terminal; everything else keeps the
/// poll loop running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Finished,
    Errored { details: String },
}

impl JobState {
    /// Parses a raw status string from the API.
    ///
    /// Unknown statuses are treated as still running rather than terminal,
    /// so a new intermediate server-side state never ends a poll loop early.
    pub fn parse(raw: &str, error_details: Option<&str>) -> Self {
        match raw {
            "pending" => JobState::Pending,
            "finished" => JobState::Finished,
            "errored" => JobState::Errored {
                details: error_details
                    .unwrap_or("job reported errored status")
                    .to_string(),
            },
            _ => JobState::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished | JobState::Errored { .. })
    }
}
