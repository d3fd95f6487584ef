//! Pathreveal animates vector drawings as if they were being drawn by hand.
//!
//! A [`Drawing`] is parsed from SVG or path data and handed to a [`RevealEngine`]. Each frame
//! the host feeds a [`ClockSample`]; the engine decides which segments are drawn and how
//! far, hands them to a [`Painter`], and reports element completions in order through
//! [`RevealListener`]s once the frame is done.
//!
//! - Order segments with an [`OrderPolicy`]
//! - Restrict the animated span with a [`VisibleRange`]
//! - Rasterize with [`CpuPainter`] or record calls with [`RecordingPainter`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves.
pub mod animation;
/// Clock samples and restart detection.
pub mod clock;
/// JSON configuration.
pub mod config;
/// Diagnostics recording.
pub mod diag;
/// Lifecycle coordinator and listeners.
pub mod engine;
mod foundation;
/// Segment ordering.
pub mod order;
/// Progress mapping and painting.
pub mod paint;
/// Visible-range partitioning.
pub mod range;
/// Completion sequencing.
pub mod sequence;
/// Drawing sources and model.
pub mod source;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, PathIndex, Point, Rect, Rgba8, Vec2, fit_transform,
};
pub use crate::foundation::error::{RevealError, RevealResult};

pub use crate::animation::ease::Ease;
pub use crate::clock::ticker::{
    Clock, ClockSample, ClockStatus, FrameClock, ManualClock, RestartDetector,
};
pub use crate::config::model::RevealConfig;
pub use crate::diag::recorder::{DiagnosticEvent, DiagnosticSink, FrameRecorder};
pub use crate::engine::coordinator::{FramePlan, RevealEngine};
pub use crate::engine::listener::{ListenerId, RevealListener};
pub use crate::order::policy::OrderPolicy;
pub use crate::paint::mapper::{DrawInstruction, PaintMode, Weighting};
pub use crate::paint::painter::{
    CpuPainter, FrameRgba, PaintStyle, Painter, RecordingPainter, trim_path,
};
pub use crate::range::partition::{Partition, VisibleRange};
pub use crate::sequence::sequencer::{CompletionEvent, SequencerState};
pub use crate::source::model::{Drawing, DrawingElement, PathSegment, RawElement, SegmentStyle};
pub use crate::source::parse::{Source, parse};
