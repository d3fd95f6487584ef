//! Render order of segments.

/// Ordering policies and the stable sort that applies them.
pub mod policy;
