use kurbo::{PathEl, Shape};

use crate::foundation::core::{BezPath, PathIndex, Rect, Rgba8};

/// Arclength accuracy used for segment lengths and trims.
pub const LENGTH_ACCURACY: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Paint attributes captured from the source for one drawing element.
pub struct SegmentStyle {
    /// Stroke colour, `None` when the source declares no stroke.
    pub stroke: Option<Rgba8>,
    /// Stroke width in source units.
    pub stroke_width: f64,
    /// Fill colour, `None` when the source declares no fill.
    pub fill: Option<Rgba8>,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            stroke: Some(Rgba8::BLACK),
            stroke_width: 1.0,
            fill: None,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Atomic drawable unit: one contour of one original drawing element.
pub struct PathSegment {
    /// Index of the original element this contour belongs to.
    pub path_index: PathIndex,
    /// Position in the parsed (pre-sort) list. Restores original order without a comparator.
    pub source_order: usize,
    /// Contour geometry.
    #[serde(skip)]
    pub geometry: BezPath,
    /// Bounding box of the geometry.
    pub bounds: Rect,
    /// Total arclength of the geometry.
    pub length: f64,
    /// Paint attributes inherited from the element.
    pub style: SegmentStyle,
}

impl PathSegment {
    /// Build a segment, measuring bounds and length from `geometry`.
    pub fn new(
        path_index: PathIndex,
        source_order: usize,
        geometry: BezPath,
        style: SegmentStyle,
    ) -> Self {
        let bounds = geometry.bounding_box();
        let length = geometry.perimeter(LENGTH_ACCURACY);
        Self {
            path_index,
            source_order,
            geometry,
            bounds,
            length,
            style,
        }
    }

    /// Area of the bounding box, used by size-based orderings.
    pub fn area(&self) -> f64 {
        self.bounds.area()
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Original drawing element as declared by the source.
pub struct DrawingElement {
    /// Dense index in declaration order.
    pub path_index: PathIndex,
    /// Source identifier (SVG `id`), if any.
    pub id: Option<String>,
    /// Union of the element's segment bounds.
    pub bounds: Rect,
    /// Sum of the element's segment lengths.
    pub length: f64,
    /// Number of segments the element was split into.
    pub segment_count: usize,
    /// Paint attributes.
    pub style: SegmentStyle,
}

/// One raw element handed over by a source reader before contour splitting.
#[derive(Clone, Debug)]
pub struct RawElement {
    /// Source identifier, if any.
    pub id: Option<String>,
    /// Full element geometry, possibly with several subpaths.
    pub path: BezPath,
    /// Paint attributes.
    pub style: SegmentStyle,
}

#[derive(Clone, Debug, Default)]
/// Parsed drawing: elements plus their segments in original order.
pub struct Drawing {
    /// Elements indexed by `path_index`.
    pub elements: Vec<DrawingElement>,
    /// Segments in original order; `source_order` equals position.
    pub segments: Vec<PathSegment>,
    /// Union of all element bounds.
    pub bounds: Rect,
}

impl Drawing {
    /// Split raw elements into contours and assign dense path indices.
    ///
    /// Elements without any drawable contour are dropped before indexing.
    pub fn from_raw(raw: impl IntoIterator<Item = RawElement>) -> Self {
        let mut elements = Vec::new();
        let mut segments = Vec::new();
        let mut bounds: Option<Rect> = None;

        for el in raw {
            let contours = split_contours(&el.path);
            if contours.is_empty() {
                continue;
            }
            let path_index = elements.len();
            let first = segments.len();
            for contour in contours {
                let source_order = segments.len();
                segments.push(PathSegment::new(path_index, source_order, contour, el.style));
            }
            let own = &segments[first..];
            let el_bounds = own
                .iter()
                .map(|s| s.bounds)
                .reduce(|a, b| a.union(b))
                .unwrap_or(Rect::ZERO);
            bounds = Some(match bounds {
                Some(b) => b.union(el_bounds),
                None => el_bounds,
            });
            elements.push(DrawingElement {
                path_index,
                id: el.id,
                bounds: el_bounds,
                length: own.iter().map(|s| s.length).sum(),
                segment_count: own.len(),
                style: el.style,
            });
        }

        Self {
            elements,
            segments,
            bounds: bounds.unwrap_or(Rect::ZERO),
        }
    }

    /// Largest valid path index, `None` for an empty drawing.
    pub fn max_path_index(&self) -> Option<PathIndex> {
        self.elements.len().checked_sub(1)
    }

    /// Look up an element by path index.
    pub fn element(&self, path_index: PathIndex) -> Option<&DrawingElement> {
        self.elements.get(path_index)
    }

    /// True when no element survived parsing.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Split a path at every `MoveTo`, keeping only contours that draw something.
pub fn split_contours(path: &BezPath) -> Vec<BezPath> {
    let mut out = Vec::new();
    let mut cur = BezPath::new();
    let mut drawn = false;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(_) => {
                if drawn {
                    out.push(std::mem::take(&mut cur));
                } else {
                    cur.truncate(0);
                }
                drawn = false;
                cur.push(*el);
            }
            PathEl::ClosePath => {
                if drawn {
                    cur.push(*el);
                }
            }
            _ => {
                if cur.elements().is_empty() {
                    cur.move_to((0.0, 0.0));
                }
                drawn = true;
                cur.push(*el);
            }
        }
    }
    if drawn {
        out.push(cur);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/model.rs"]
mod tests;
