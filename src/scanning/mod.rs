/// Scanning layer - Domain models and pure services
///
/// Contains the target/component/result domain types and the pure
/// extraction, matching, and grouping services that operate on them.
/// Nothing in this layer performs I/O.
pub mod domain;
pub mod services;
