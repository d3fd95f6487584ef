//! Turning progress into strokes.

/// Progress to per-segment draw fractions.
pub mod mapper;
/// Path trimming, painter trait and the CPU rasterizer.
pub mod painter;
