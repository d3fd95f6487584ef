use super::*;

fn completed(events: &[CompletionEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            CompletionEvent::SegmentCompleted { path_index } => Some(*path_index),
            CompletionEvent::AnimationFinished => None,
        })
        .collect()
}

#[test]
fn emits_contiguous_run_from_foreground_start() {
    let mut s = CompletionSequencer::new();
    let fg = Some((1, 3));
    assert_eq!(s.observe(None, fg).emitted, 0);
    assert_eq!(s.state(), SequencerState::Idle);

    s.observe(Some(2), fg);
    assert_eq!(completed(&s.flush()), vec![1, 2]);
    assert_eq!(s.state(), SequencerState::Advancing(2));

    s.observe(Some(3), fg);
    assert_eq!(completed(&s.flush()), vec![3]);
    assert_eq!(s.state(), SequencerState::Finished(3));
}

#[test]
fn repeated_observation_does_not_duplicate() {
    let mut s = CompletionSequencer::new();
    let fg = Some((0, 4));
    s.observe(Some(2), fg);
    s.observe(Some(2), fg);
    s.observe(Some(1), fg);
    assert_eq!(completed(&s.flush()), vec![0, 1, 2]);
    assert_eq!(s.last_completed(), Some(2));
}

#[test]
fn out_of_bounds_index_is_clamped() {
    let mut s = CompletionSequencer::new();
    let obs = s.observe(Some(9), Some((0, 2)));
    assert_eq!(obs.clamped, Some((9, 2)));
    assert_eq!(completed(&s.flush()), vec![0, 1, 2]);
    assert_eq!(s.state(), SequencerState::Finished(2));
}

#[test]
fn finished_fires_once_per_run() {
    let mut s = CompletionSequencer::new();
    assert!(s.clock_completed());
    assert!(!s.clock_completed());
    assert_eq!(s.flush(), vec![CompletionEvent::AnimationFinished]);

    s.reset();
    assert!(s.clock_completed());
}

#[test]
fn reset_returns_to_idle_and_restarts_numbering() {
    let mut s = CompletionSequencer::new();
    s.observe(Some(2), Some((0, 2)));
    s.flush();
    s.reset();
    assert_eq!(s.state(), SequencerState::Idle);
    assert_eq!(s.last_completed(), None);
    assert_eq!(s.run(), 1);
    s.observe(Some(0), Some((0, 2)));
    assert_eq!(completed(&s.flush()), vec![0]);
}

#[test]
fn reset_and_dispose_drop_pending_events() {
    let mut s = CompletionSequencer::new();
    s.observe(Some(1), Some((0, 3)));
    s.reset();
    assert!(s.pending().is_empty());

    s.observe(Some(1), Some((0, 3)));
    s.dispose();
    assert!(s.flush().is_empty());
    assert_eq!(s.observe(Some(3), Some((0, 3))).emitted, 0);
    assert!(!s.clock_completed());
    assert!(s.is_disposed());
}

#[test]
fn empty_foreground_ignores_reports() {
    let mut s = CompletionSequencer::new();
    assert_eq!(s.observe(Some(0), None), Observation::default());
}
