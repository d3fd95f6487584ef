use std::rc::Rc;

use crate::{
    foundation::core::PathIndex,
    sequence::sequencer::CompletionEvent,
    source::model::{Drawing, DrawingElement},
};

/// Host-side receiver of completion notifications.
///
/// Called after the frame's paint pass, never from inside it.
pub trait RevealListener {
    /// The original element `path_index` finished drawing.
    fn on_segment_completed(&self, path_index: PathIndex, element: &DrawingElement);

    /// The run reached its end.
    fn on_animation_finished(&self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle returned by [`Listeners::subscribe`].
pub struct ListenerId(u64);

#[derive(Default)]
/// Subscribed listeners, deduplicated by identity.
pub struct Listeners {
    next: u64,
    entries: Vec<(ListenerId, Rc<dyn RevealListener>)>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    /// Add `listener`. Subscribing the same `Rc` again returns the existing id.
    pub fn subscribe(&mut self, listener: Rc<dyn RevealListener>) -> ListenerId {
        if let Some((id, _)) = self
            .entries
            .iter()
            .find(|(_, l)| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(&listener)))
        {
            return *id;
        }
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `events` to every listener in subscription order.
    pub(crate) fn dispatch(&self, events: &[CompletionEvent], drawing: &Drawing) {
        for event in events {
            match *event {
                CompletionEvent::SegmentCompleted { path_index } => {
                    let Some(element) = drawing.element(path_index) else {
                        tracing::warn!(path_index, "completed element missing from drawing");
                        continue;
                    };
                    for (_, l) in &self.entries {
                        l.on_segment_completed(path_index, element);
                    }
                }
                CompletionEvent::AnimationFinished => {
                    for (_, l) in &self.entries {
                        l.on_animation_finished();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/listener.rs"]
mod tests;
