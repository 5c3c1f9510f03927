pub mod scan_targets;

pub use scan_targets::ScanTargetsUseCase;
