pub mod scan_report;
pub mod scan_request;

pub use scan_report::{FailedTarget, ScanReport};
pub use scan_request::{ScanMode, ScanRequest};
