//! Frame-by-frame introspection.

/// Diagnostic events, sinks and a JSON-lines recorder.
pub mod recorder;
