/// Ports layer - Interface definitions for infrastructure
pub mod outbound;
