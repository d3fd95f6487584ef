use super::*;
use crate::{
    order::policy::{OrderPolicy, sort_segments},
    source::model::{Drawing, RawElement, SegmentStyle},
};

fn five_lines() -> Drawing {
    Drawing::from_raw((0..5).map(|i| RawElement {
        id: None,
        path: kurbo::BezPath::from_svg(&format!("M0,{i} L{},{i}", 10 * (i + 1))).unwrap(),
        style: SegmentStyle::default(),
    }))
}

fn path_indices(ordered: &[PathSegment], positions: &[usize]) -> Vec<usize> {
    positions.iter().map(|&p| ordered[p].path_index).collect()
}

#[test]
fn validate_enforces_ordering_and_domain() {
    assert!(VisibleRange::new(1, 3).validate(Some(4)).is_ok());
    assert!(VisibleRange::new(0, 4).validate(Some(4)).is_ok());
    assert!(VisibleRange::new(3, 3).validate(Some(4)).is_ok());

    let err = VisibleRange::new(2, 1).validate(Some(4)).unwrap_err();
    assert!(matches!(
        err,
        RevealError::RangeInvalid {
            start: 2,
            end: 1,
            max_path_index: Some(4)
        }
    ));
    assert!(VisibleRange::new(0, 5).validate(Some(4)).is_err());
    assert!(VisibleRange::new(0, 0).validate(None).is_err());
}

#[test]
fn five_segments_split_into_three_buckets() {
    let d = five_lines();
    let p = Partition::compute(&d.segments, Some(VisibleRange::new(1, 3)));
    assert_eq!(path_indices(&d.segments, &p.background), vec![0]);
    assert_eq!(path_indices(&d.segments, &p.foreground), vec![1, 2, 3]);
    assert_eq!(path_indices(&d.segments, &p.excluded), vec![4]);
    assert_eq!(p.min_foreground_index(), Some(1));
    assert_eq!(p.max_foreground_index(), Some(3));
}

#[test]
fn no_range_means_everything_is_foreground() {
    let d = five_lines();
    let p = Partition::compute(&d.segments, None);
    assert!(p.background.is_empty());
    assert!(p.excluded.is_empty());
    assert_eq!(p.foreground.len(), 5);
}

#[test]
fn buckets_cover_every_segment_exactly_once_for_all_ranges() {
    let d = five_lines();
    let ordered = sort_segments(&d.segments, OrderPolicy::DecreasingLength);
    for s in 0..5 {
        for e in s..5 {
            let p = Partition::compute(&ordered, Some(VisibleRange::new(s, e)));
            let mut all: Vec<usize> = p
                .background
                .iter()
                .chain(&p.foreground)
                .chain(&p.excluded)
                .copied()
                .collect();
            all.sort_unstable();
            assert_eq!(all, vec![0, 1, 2, 3, 4]);
            assert!(p.background.iter().all(|&i| ordered[i].path_index < s));
            assert!(p.excluded.iter().all(|&i| ordered[i].path_index > e));
        }
    }
}

#[test]
fn membership_is_order_independent_but_render_order_follows_policy() {
    let d = five_lines();
    let range = Some(VisibleRange::new(1, 3));
    let original = Partition::compute(&d.segments, range);
    let ordered = sort_segments(&d.segments, OrderPolicy::DecreasingLength);
    let by_length = Partition::compute(&ordered, range);

    let mut a = path_indices(&d.segments, &original.foreground);
    let b = path_indices(&ordered, &by_length.foreground);
    assert_eq!(b, vec![3, 2, 1]);
    a.reverse();
    assert_eq!(a, b);
}

#[test]
fn partitioner_caches_by_generation_and_range() {
    let d = five_lines();
    let mut p = Partitioner::new();
    let r = Some(VisibleRange::new(1, 3));

    assert!(p.update(&d.segments, 1, r, d.max_path_index()).unwrap());
    let first = p.current().unwrap().clone();
    assert!(!p.update(&d.segments, 1, r, d.max_path_index()).unwrap());
    assert_eq!(p.recomputations(), 1);
    assert_eq!(p.current().unwrap(), &first);

    assert!(p.update(&d.segments, 2, r, d.max_path_index()).unwrap());
    assert_eq!(p.current().unwrap(), &first);
    assert_eq!(p.recomputations(), 2);
}

#[test]
fn rejected_range_keeps_previous_partition() {
    let d = five_lines();
    let mut p = Partitioner::new();
    p.update(&d.segments, 1, Some(VisibleRange::new(1, 3)), Some(4))
        .unwrap();
    let before = p.current().unwrap().clone();

    let err = p
        .update(&d.segments, 1, Some(VisibleRange::new(2, 1)), Some(4))
        .unwrap_err();
    assert!(matches!(err, RevealError::RangeInvalid { .. }));
    assert_eq!(p.current().unwrap(), &before);
    assert_eq!(p.recomputations(), 1);
}
