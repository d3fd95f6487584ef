//! Host clock readings and restart detection.

/// Clock samples, frame-driven and manual clocks.
pub mod ticker;
