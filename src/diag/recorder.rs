use std::{cell::RefCell, rc::Rc};

use crate::{
    foundation::core::PathIndex,
    foundation::error::{RevealError, RevealResult},
    order::policy::OrderPolicy,
    range::partition::VisibleRange,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Frame-by-frame introspection record.
pub enum DiagnosticEvent {
    /// One evaluated frame.
    Frame {
        /// Run epoch the frame belongs to.
        run: u64,
        /// Eased progress used for mapping.
        progress: f64,
        /// Background segments drawn.
        background: usize,
        /// Foreground segments drawn (partially or fully).
        drawn: usize,
        /// Highest completed path index reported by the mapper.
        highest_completed: Option<PathIndex>,
    },
    /// The mapper reported an index beyond the known foreground.
    IndexClamped {
        /// Reported index.
        reported: PathIndex,
        /// Index used instead.
        clamped_to: PathIndex,
    },
    /// An ordering policy name was not recognized.
    PolicyFallback {
        /// Name as given.
        requested: String,
        /// Policy used instead.
        used: OrderPolicy,
    },
    /// A range assignment was rejected.
    RangeRejected {
        /// Rejected range.
        range: VisibleRange,
        /// Largest valid path index at the time.
        max_path_index: Option<PathIndex>,
    },
    /// A new run started.
    Restart {
        /// New run epoch.
        run: u64,
    },
    /// Derived state was rebuilt.
    Resync {
        /// Segment generation after the rebuild.
        generation: u64,
        /// Policy used for render order.
        policy: OrderPolicy,
    },
    /// The segment list was swapped.
    SourceReplaced {
        /// Number of elements in the new drawing.
        elements: usize,
        /// Number of segments in the new drawing.
        segments: usize,
    },
}

/// Consumer of diagnostic events.
pub trait DiagnosticSink {
    /// Record one event.
    fn record(&mut self, event: &DiagnosticEvent);
}

#[derive(Debug, Default)]
/// In-memory diagnostic sink, used for recording and replay tooling.
pub struct FrameRecorder {
    events: Vec<DiagnosticEvent>,
}

impl FrameRecorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in arrival order.
    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// One JSON object per line.
    pub fn to_json_lines(&self) -> RevealResult<String> {
        let mut out = String::new();
        for e in &self.events {
            let line = serde_json::to_string(e).map_err(|e| RevealError::serde(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse the output of [`FrameRecorder::to_json_lines`].
    pub fn from_json_lines(text: &str) -> RevealResult<Self> {
        let events = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(|e| RevealError::serde(e.to_string())))
            .collect::<RevealResult<Vec<_>>>()?;
        Ok(Self { events })
    }
}

impl DiagnosticSink for FrameRecorder {
    fn record(&mut self, event: &DiagnosticEvent) {
        self.events.push(event.clone());
    }
}

impl<T: DiagnosticSink> DiagnosticSink for Rc<RefCell<T>> {
    fn record(&mut self, event: &DiagnosticEvent) {
        self.borrow_mut().record(event);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diag/recorder.rs"]
mod tests;
