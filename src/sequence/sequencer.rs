use crate::foundation::core::PathIndex;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Progress of the completion stream within one run.
pub enum SequencerState {
    /// Nothing completed yet.
    #[default]
    Idle,
    /// Completed through the given index, more to come.
    Advancing(PathIndex),
    /// Completed through the last foreground index.
    Finished(PathIndex),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// Notification queued for delivery after the frame.
pub enum CompletionEvent {
    /// The original element `path_index` is fully drawn.
    SegmentCompleted {
        /// Original element index.
        path_index: PathIndex,
    },
    /// The clock reported the end of the run.
    AnimationFinished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Outcome of one [`CompletionSequencer::observe`] call.
pub struct Observation {
    /// Segment events queued by this call.
    pub emitted: usize,
    /// `(reported, clamped_to)` when the reported index exceeded the foreground.
    pub clamped: Option<(PathIndex, PathIndex)>,
}

#[derive(Debug, Default)]
/// Emits one completion event per element, in increasing order, once per run.
///
/// Events are only queued here; the host drains them with [`CompletionSequencer::flush`]
/// after the frame's paint pass.
pub struct CompletionSequencer {
    state: SequencerState,
    last_completed: Option<PathIndex>,
    finished_fired: bool,
    disposed: bool,
    run: u64,
    pending: Vec<CompletionEvent>,
}

impl CompletionSequencer {
    /// Idle sequencer for run 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Highest element index whose completion was emitted this run.
    pub fn last_completed(&self) -> Option<PathIndex> {
        self.last_completed
    }

    /// Current run epoch.
    pub fn run(&self) -> u64 {
        self.run
    }

    /// True once `AnimationFinished` was queued for this run.
    pub fn finished_fired(&self) -> bool {
        self.finished_fired
    }

    /// True after [`CompletionSequencer::dispose`] until the next reset.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Events queued and not yet flushed.
    pub fn pending(&self) -> &[CompletionEvent] {
        &self.pending
    }

    /// Feed the mapper's highest completed index for the current foreground `first..=last`.
    ///
    /// Queues one event for every index in `(last_completed, reported]` not below `first`.
    /// A reported index past `last` is clamped to `last`.
    pub fn observe(
        &mut self,
        reported: Option<PathIndex>,
        foreground: Option<(PathIndex, PathIndex)>,
    ) -> Observation {
        let mut obs = Observation::default();
        if self.disposed {
            return obs;
        }
        let Some(reported) = reported else {
            return obs;
        };
        let Some((first, last)) = foreground else {
            tracing::warn!(reported, "completion reported for an empty foreground");
            return obs;
        };

        let target = if reported > last {
            tracing::warn!(reported, clamped_to = last, "completion index out of bounds");
            obs.clamped = Some((reported, last));
            last
        } else {
            reported
        };

        let from = self.last_completed.map_or(first, |l| l + 1).max(first);
        for path_index in from..=target {
            self.pending
                .push(CompletionEvent::SegmentCompleted { path_index });
            obs.emitted += 1;
        }

        if self.last_completed.is_none_or(|l| target > l) {
            self.last_completed = Some(target);
            self.state = if target >= last {
                SequencerState::Finished(target)
            } else {
                SequencerState::Advancing(target)
            };
        }
        obs
    }

    /// Queue the one-shot end-of-run notification. Returns true when it was queued now.
    pub fn clock_completed(&mut self) -> bool {
        if self.disposed || self.finished_fired {
            return false;
        }
        self.finished_fired = true;
        self.pending.push(CompletionEvent::AnimationFinished);
        true
    }

    /// Start a new run: back to idle without any undo events; pending events are dropped.
    pub fn reset(&mut self) {
        self.state = SequencerState::Idle;
        self.last_completed = None;
        self.finished_fired = false;
        self.disposed = false;
        self.run += 1;
        self.pending.clear();
    }

    /// Stop the run: pending events are discarded and nothing is queued until the next reset.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending.clear();
    }

    /// Drain queued events for delivery.
    pub fn flush(&mut self) -> Vec<CompletionEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
