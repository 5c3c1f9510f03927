pub mod progress_reporter;
pub mod summary;

pub use progress_reporter::StderrProgressReporter;
