use std::cmp::Ordering;

use crate::{paint::mapper::PaintMode, source::model::PathSegment};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Closed set of segment ordering policies.
pub enum OrderPolicy {
    /// Declaration order. Restored from `source_order`, no comparator needed.
    #[default]
    Original,
    /// Declaration order, last element first.
    Reversed,
    /// By left edge, ascending.
    LeftToRight,
    /// By right edge, descending.
    RightToLeft,
    /// By top edge, ascending.
    TopToBottom,
    /// By bottom edge, descending.
    BottomToTop,
    /// By top edge, then left edge.
    TopToBottomLeftToRight,
    /// Shortest segments first.
    IncreasingLength,
    /// Longest segments first.
    DecreasingLength,
    /// Smallest bounding box first.
    IncreasingSize,
    /// Largest bounding box first.
    DecreasingSize,
}

type Comparator = fn(&PathSegment, &PathSegment) -> Ordering;

impl OrderPolicy {
    /// Every policy, in a stable listing order.
    pub const ALL: [OrderPolicy; 11] = [
        Self::Original,
        Self::Reversed,
        Self::LeftToRight,
        Self::RightToLeft,
        Self::TopToBottom,
        Self::BottomToTop,
        Self::TopToBottomLeftToRight,
        Self::IncreasingLength,
        Self::DecreasingLength,
        Self::IncreasingSize,
        Self::DecreasingSize,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Reversed => "reversed",
            Self::LeftToRight => "left_to_right",
            Self::RightToLeft => "right_to_left",
            Self::TopToBottom => "top_to_bottom",
            Self::BottomToTop => "bottom_to_top",
            Self::TopToBottomLeftToRight => "top_to_bottom_left_to_right",
            Self::IncreasingLength => "increasing_length",
            Self::DecreasingLength => "decreasing_length",
            Self::IncreasingSize => "increasing_size",
            Self::DecreasingSize => "decreasing_size",
        }
    }

    /// Resolve a policy by name, `None` when unknown.
    ///
    /// Matching ignores case and treats `-` like `_`.
    pub fn parse_strict(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|p| p.name() == norm)
    }

    /// Resolve a policy by name, falling back to [`OrderPolicy::Original`] when unknown.
    pub fn from_name(name: &str) -> Self {
        Self::parse_strict(name).unwrap_or_else(|| {
            tracing::warn!(policy = name, "unrecognized ordering policy, using original");
            Self::Original
        })
    }

    fn comparator(self) -> Option<Comparator> {
        let cmp: Comparator = match self {
            Self::Original => return None,
            Self::Reversed => |a, b| b.path_index.cmp(&a.path_index),
            Self::LeftToRight => |a, b| a.bounds.x0.total_cmp(&b.bounds.x0),
            Self::RightToLeft => |a, b| b.bounds.x1.total_cmp(&a.bounds.x1),
            Self::TopToBottom => |a, b| a.bounds.y0.total_cmp(&b.bounds.y0),
            Self::BottomToTop => |a, b| b.bounds.y1.total_cmp(&a.bounds.y1),
            Self::TopToBottomLeftToRight => |a, b| {
                a.bounds
                    .y0
                    .total_cmp(&b.bounds.y0)
                    .then(a.bounds.x0.total_cmp(&b.bounds.x0))
            },
            Self::IncreasingLength => |a, b| a.length.total_cmp(&b.length),
            Self::DecreasingLength => |a, b| b.length.total_cmp(&a.length),
            Self::IncreasingSize => |a, b| a.area().total_cmp(&b.area()),
            Self::DecreasingSize => |a, b| b.area().total_cmp(&a.area()),
        };
        Some(cmp)
    }
}

/// Policy actually used for rendering under `mode`.
///
/// [`PaintMode::AllAtOnce`] paints the foreground in one pass and forces original order. The
/// requested policy is left untouched so it applies again once the mode changes back.
pub fn effective_policy(requested: OrderPolicy, mode: PaintMode) -> OrderPolicy {
    match mode {
        PaintMode::AllAtOnce => OrderPolicy::Original,
        PaintMode::OneByOne => requested,
    }
}

/// Stable sort of `segments` under `policy`. Ties fall back to `path_index`, then `source_order`.
pub fn sort_segments(segments: &[PathSegment], policy: OrderPolicy) -> Vec<PathSegment> {
    let mut out = segments.to_vec();
    let original = |a: &PathSegment, b: &PathSegment| a.source_order.cmp(&b.source_order);
    match policy.comparator() {
        None => out.sort_by(original),
        Some(cmp) => out.sort_by(|a, b| {
            cmp(a, b)
                .then(a.path_index.cmp(&b.path_index))
                .then_with(|| original(a, b))
        }),
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/order/policy.rs"]
mod tests;
