use std::cell::RefCell;

use super::*;
use crate::source::model::{RawElement, SegmentStyle};

#[derive(Default)]
struct Log(RefCell<Vec<String>>);

impl RevealListener for Log {
    fn on_segment_completed(&self, path_index: PathIndex, element: &DrawingElement) {
        assert_eq!(path_index, element.path_index);
        self.0.borrow_mut().push(format!("seg{path_index}"));
    }

    fn on_animation_finished(&self) {
        self.0.borrow_mut().push("done".to_string());
    }
}

fn two_elements() -> Drawing {
    Drawing::from_raw((0..2).map(|i| RawElement {
        id: None,
        path: kurbo::BezPath::from_svg(&format!("M0,{i} L5,{i}")).unwrap(),
        style: SegmentStyle::default(),
    }))
}

#[test]
fn resubscribing_the_same_listener_is_idempotent() {
    let mut ls = Listeners::default();
    let log = Rc::new(Log::default());
    let a = ls.subscribe(log.clone());
    let b = ls.subscribe(log.clone());
    assert_eq!(a, b);
    assert_eq!(ls.len(), 1);

    let other = ls.subscribe(Rc::new(Log::default()));
    assert_ne!(a, other);
    assert_eq!(ls.len(), 2);
}

#[test]
fn unsubscribe_removes_once() {
    let mut ls = Listeners::default();
    let id = ls.subscribe(Rc::new(Log::default()));
    assert!(ls.unsubscribe(id));
    assert!(!ls.unsubscribe(id));
    assert!(ls.is_empty());
}

#[test]
fn dispatch_delivers_in_order_with_elements() {
    let mut ls = Listeners::default();
    let log = Rc::new(Log::default());
    ls.subscribe(log.clone());
    ls.dispatch(
        &[
            CompletionEvent::SegmentCompleted { path_index: 0 },
            CompletionEvent::SegmentCompleted { path_index: 1 },
            CompletionEvent::SegmentCompleted { path_index: 7 },
            CompletionEvent::AnimationFinished,
        ],
        &two_elements(),
    );
    assert_eq!(*log.0.borrow(), vec!["seg0", "seg1", "done"]);
}
