//! Ordered, once-per-run completion events.

/// Completion sequencer.
pub mod sequencer;
