//! Progress curves.

/// Easing functions applied to clock progress.
pub mod ease;
