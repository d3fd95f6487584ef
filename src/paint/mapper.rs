use crate::{foundation::core::PathIndex, range::partition::Partition, source::model::PathSegment};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the animation timeline is shared between foreground segments.
pub enum Weighting {
    /// Reveal time proportional to arclength: uniform drawing speed.
    #[default]
    Length,
    /// Equal time per segment.
    Count,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How foreground segments share progress.
pub enum PaintMode {
    /// Segments are revealed one after another along the timeline.
    #[default]
    OneByOne,
    /// Every foreground segment is revealed simultaneously in a single pass.
    AllAtOnce,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Foreground timeline prepared once per partition.
///
/// Spans are parallel to `Partition::foreground`. Completion thresholds are indexed by
/// `path_index - first` and are non-decreasing, so the completed prefix is a binary search.
pub struct Timeline {
    count_spans: Vec<(f64, f64)>,
    length_spans: Vec<(f64, f64)>,
    count_done: Vec<f64>,
    length_done: Vec<f64>,
    first: Option<PathIndex>,
}

impl Timeline {
    /// Lay out `foreground` positions of `ordered` on the normalized timeline.
    pub fn build(ordered: &[PathSegment], foreground: &[usize]) -> Self {
        let n = foreground.len();
        if n == 0 {
            return Self::default();
        }

        let count_spans: Vec<(f64, f64)> = (0..n)
            .map(|i| (i as f64 / n as f64, (i + 1) as f64 / n as f64))
            .collect();

        let total: f64 = foreground.iter().map(|&p| ordered[p].length).sum();
        let length_spans = if total > 0.0 && total.is_finite() {
            let mut acc = 0.0;
            let mut spans: Vec<(f64, f64)> = foreground
                .iter()
                .map(|&p| {
                    let start = acc / total;
                    acc += ordered[p].length;
                    (start, (acc / total).min(1.0))
                })
                .collect();
            if let Some(last) = spans.last_mut() {
                last.1 = 1.0;
            }
            spans
        } else {
            count_spans.clone()
        };

        let (lo, hi) = foreground
            .iter()
            .map(|&p| ordered[p].path_index)
            .fold((usize::MAX, 0), |(lo, hi), i| (lo.min(i), hi.max(i)));
        let slots = hi - lo + 1;

        let thresholds = |spans: &[(f64, f64)]| {
            let mut done = vec![0.0f64; slots];
            for (&p, &(_, end)) in foreground.iter().zip(spans) {
                let k = ordered[p].path_index - lo;
                done[k] = done[k].max(end);
            }
            for k in 1..slots {
                done[k] = done[k].max(done[k - 1]);
            }
            done
        };
        let count_done = thresholds(&count_spans);
        let length_done = thresholds(&length_spans);

        Self {
            count_spans,
            length_spans,
            count_done,
            length_done,
            first: Some(lo),
        }
    }

    /// Smallest foreground path index.
    pub fn first_index(&self) -> Option<PathIndex> {
        self.first
    }

    /// Largest foreground path index.
    pub fn last_index(&self) -> Option<PathIndex> {
        self.first.map(|f| f + self.count_done.len() - 1)
    }

    /// `(start, end)` of every foreground segment for `weighting`.
    pub fn spans(&self, weighting: Weighting) -> &[(f64, f64)] {
        match weighting {
            Weighting::Length => &self.length_spans,
            Weighting::Count => &self.count_spans,
        }
    }

    /// Highest path index `h` such that every foreground element up to `h` is fully drawn.
    ///
    /// Nothing is complete at progress 0, zero-length elements included.
    pub fn completed_through(&self, progress: f64, weighting: Weighting) -> Option<PathIndex> {
        if progress <= 0.0 {
            return None;
        }
        let done = match weighting {
            Weighting::Length => &self.length_done,
            Weighting::Count => &self.count_done,
        };
        let k = done.partition_point(|&t| t <= progress);
        k.checked_sub(1).and_then(|k| self.first.map(|f| f + k))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One segment to paint this frame.
pub struct DrawInstruction {
    /// Position in the ordered segment list.
    pub position: usize,
    /// Original element index.
    pub path_index: PathIndex,
    /// Drawn share of the segment's length, in `(0, 1]`.
    pub fraction: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Foreground paint decisions for one progress value.
pub struct PaintPlan {
    /// Partially or fully drawn foreground segments, in render order.
    pub foreground: Vec<DrawInstruction>,
    /// Highest path index whose element and all foreground predecessors are fully drawn.
    pub highest_completed: Option<PathIndex>,
}

/// Map `progress` onto the foreground of `partition`.
///
/// Segments not yet reached are omitted. Background segments are not part of the plan; they
/// are drawn fully regardless of progress.
pub fn map_progress(
    ordered: &[PathSegment],
    partition: &Partition,
    progress: f64,
    weighting: Weighting,
    mode: PaintMode,
) -> PaintPlan {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let timeline = &partition.timeline;

    match mode {
        PaintMode::AllAtOnce => {
            if progress <= 0.0 {
                return PaintPlan::default();
            }
            let foreground = partition
                .foreground
                .iter()
                .map(|&position| DrawInstruction {
                    position,
                    path_index: ordered[position].path_index,
                    fraction: progress,
                })
                .collect();
            let highest_completed = if progress >= 1.0 {
                timeline.last_index()
            } else {
                None
            };
            PaintPlan {
                foreground,
                highest_completed,
            }
        }
        PaintMode::OneByOne => {
            if progress <= 0.0 {
                return PaintPlan::default();
            }
            let mut foreground = Vec::new();
            for (&position, &(start, end)) in
                partition.foreground.iter().zip(timeline.spans(weighting))
            {
                let fraction = if progress >= end {
                    1.0
                } else if progress <= start {
                    continue;
                } else {
                    (progress - start) / (end - start)
                };
                foreground.push(DrawInstruction {
                    position,
                    path_index: ordered[position].path_index,
                    fraction,
                });
            }
            PaintPlan {
                foreground,
                highest_completed: timeline.completed_through(progress, weighting),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/mapper.rs"]
mod tests;
