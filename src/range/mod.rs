//! Visible-range partitioning.

/// Background/foreground/excluded split and its cache.
pub mod partition;
