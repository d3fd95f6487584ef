//! Lifecycle coordination and completion delivery.
//!
//! [`coordinator::RevealEngine`] owns every derived artifact (render order, partition,
//! timeline, completion state) and rebuilds only what a changed input invalidates.

/// Frame evaluation, resync and restart handling.
pub mod coordinator;
/// Completion listeners and their registry.
pub mod listener;
