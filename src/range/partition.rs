use crate::{
    foundation::core::PathIndex,
    foundation::error::{RevealError, RevealResult},
    paint::mapper::Timeline,
    source::model::PathSegment,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Inclusive span of original path indices eligible for drawing.
pub struct VisibleRange {
    /// First foreground path index.
    pub start: PathIndex,
    /// Last foreground path index (inclusive).
    pub end: PathIndex,
}

impl VisibleRange {
    /// Build a range without validating it.
    pub fn new(start: PathIndex, end: PathIndex) -> Self {
        Self { start, end }
    }

    /// Check `0 <= start <= end <= max_path_index`.
    pub fn validate(self, max_path_index: Option<PathIndex>) -> RevealResult<()> {
        match max_path_index {
            Some(max) if self.start <= self.end && self.end <= max => Ok(()),
            _ => Err(RevealError::range_invalid(
                self.start,
                self.end,
                max_path_index,
            )),
        }
    }

    /// True when `path_index` lies within the range.
    pub fn contains(self, path_index: PathIndex) -> bool {
        self.start <= path_index && path_index <= self.end
    }
}

/// Which bucket a segment falls into for a given range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    /// Drawn fully, independent of progress.
    Background,
    /// Animated by progress.
    Foreground,
    /// Neither drawn nor animated.
    Excluded,
}

/// Classify `path_index` against an optional range.
pub fn bucket_of(path_index: PathIndex, range: Option<VisibleRange>) -> Bucket {
    match range {
        None => Bucket::Foreground,
        Some(r) if path_index < r.start => Bucket::Background,
        Some(r) if path_index <= r.end => Bucket::Foreground,
        Some(_) => Bucket::Excluded,
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Background/foreground split of an ordered segment list.
///
/// Lists hold positions into the ordered list, so each keeps the canonical render order.
pub struct Partition {
    /// Range the split was computed for.
    pub range: Option<VisibleRange>,
    /// Positions drawn fully every frame.
    pub background: Vec<usize>,
    /// Positions animated by progress.
    pub foreground: Vec<usize>,
    /// Positions past the range end.
    pub excluded: Vec<usize>,
    /// Prepared foreground timeline.
    pub timeline: Timeline,
}

impl Partition {
    /// Split `ordered` by `range`. The range must already be validated.
    pub fn compute(ordered: &[PathSegment], range: Option<VisibleRange>) -> Self {
        let mut background = Vec::new();
        let mut foreground = Vec::new();
        let mut excluded = Vec::new();
        for (pos, seg) in ordered.iter().enumerate() {
            match bucket_of(seg.path_index, range) {
                Bucket::Background => background.push(pos),
                Bucket::Foreground => foreground.push(pos),
                Bucket::Excluded => excluded.push(pos),
            }
        }
        let timeline = Timeline::build(ordered, &foreground);
        Self {
            range,
            background,
            foreground,
            excluded,
            timeline,
        }
    }

    /// Largest foreground path index, `None` when the foreground is empty.
    pub fn max_foreground_index(&self) -> Option<PathIndex> {
        self.timeline.last_index()
    }

    /// Smallest foreground path index, `None` when the foreground is empty.
    pub fn min_foreground_index(&self) -> Option<PathIndex> {
        self.timeline.first_index()
    }
}

#[derive(Debug, Default)]
/// Caches the last partition keyed on the segment generation and range value.
pub struct Partitioner {
    key: Option<(u64, Option<VisibleRange>)>,
    current: Option<Partition>,
    recomputations: u64,
}

impl Partitioner {
    /// Create an empty partitioner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the cached partition match `(generation, range)`.
    ///
    /// Returns `Ok(true)` when the partition was recomputed. A range that fails validation is
    /// rejected before anything changes, leaving the previous partition in effect.
    pub fn update(
        &mut self,
        ordered: &[PathSegment],
        generation: u64,
        range: Option<VisibleRange>,
        max_path_index: Option<PathIndex>,
    ) -> RevealResult<bool> {
        if self.key == Some((generation, range)) {
            return Ok(false);
        }
        if let Some(r) = range {
            r.validate(max_path_index)?;
        }
        self.current = Some(Partition::compute(ordered, range));
        self.key = Some((generation, range));
        self.recomputations += 1;
        tracing::debug!(generation, ?range, "partition recomputed");
        Ok(true)
    }

    /// Most recent valid partition.
    pub fn current(&self) -> Option<&Partition> {
        self.current.as_ref()
    }

    /// Number of recomputations so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Drop the cached partition.
    pub fn clear(&mut self) {
        self.key = None;
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/range/partition.rs"]
mod tests;
