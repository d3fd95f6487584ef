//! Engine configuration loaded from JSON.

/// Configuration model and validation.
pub mod model;
