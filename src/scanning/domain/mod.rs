pub mod component;
pub mod job;
pub mod scan_result;
pub mod target;

pub use component::Component;
pub use job::{JobHandle, JobState};
pub use scan_result::{ScanResult, ScanSummary, TargetFailure, TargetOutcome};
pub use target::{RepoType, Target};
