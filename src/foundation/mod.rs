/// Shared value types and geometry re-exports.
pub mod core;
/// Error type used across the crate.
pub mod error;
