use std::path::Path;

use anyhow::Context;
use kurbo::{ParamCurve, ParamCurveArclen, PathEl, PathSeg, Shape};

use crate::{
    foundation::core::{Affine, BezPath, Canvas, PathIndex, Point, Rgba8},
    foundation::error::{RevealError, RevealResult},
    source::model::{LENGTH_ACCURACY, PathSegment, SegmentStyle},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Stroke overrides applied on top of each segment's own style.
pub struct PaintStyle {
    /// Colour for every segment, instead of the source colour.
    pub color: Option<Rgba8>,
    /// Stroke width for every segment, instead of the source width.
    pub stroke_width: Option<f64>,
}

impl PaintStyle {
    /// Reject non-positive or non-finite widths.
    pub fn validate(&self) -> RevealResult<()> {
        match self.stroke_width {
            Some(w) if !(w.is_finite() && w > 0.0) => Err(RevealError::validation(
                "stroke_width must be finite and > 0",
            )),
            _ => Ok(()),
        }
    }

    /// Colour and width to stroke `seg` with. Fill-only elements are outlined in their fill.
    pub fn resolve(&self, seg: &SegmentStyle) -> (Rgba8, f64) {
        let color = self
            .color
            .or(seg.stroke)
            .or(seg.fill)
            .unwrap_or(Rgba8::BLACK);
        let width = self.stroke_width.unwrap_or(seg.stroke_width);
        (color, width)
    }
}

/// Sub-path covering the first `fraction` of `path`'s arclength.
///
/// `fraction <= 0` yields an empty path and `fraction >= 1` the whole path.
pub fn trim_path(path: &BezPath, fraction: f64) -> BezPath {
    if fraction.is_nan() || fraction <= 0.0 {
        return BezPath::new();
    }
    if fraction >= 1.0 {
        return path.clone();
    }

    let mut remaining = path.perimeter(LENGTH_ACCURACY) * fraction;
    let mut out = BezPath::new();
    let mut pen: Option<Point> = None;
    for seg in path.segments() {
        let len = seg.arclen(LENGTH_ACCURACY);
        let piece = if remaining >= len {
            seg
        } else {
            let t = seg.inv_arclen(remaining, LENGTH_ACCURACY);
            seg.subsegment(0.0..t)
        };
        if pen != Some(piece.start()) {
            out.move_to(piece.start());
        }
        out.push(match piece {
            PathSeg::Line(l) => PathEl::LineTo(l.p1),
            PathSeg::Quad(q) => PathEl::QuadTo(q.p1, q.p2),
            PathSeg::Cubic(c) => PathEl::CurveTo(c.p1, c.p2, c.p3),
        });
        pen = Some(piece.end());
        if remaining <= len {
            break;
        }
        remaining -= len;
    }
    out
}

/// Painting collaborator: draws a segment from its start up to `fraction` of its length.
pub trait Painter {
    /// Draw `segment` up to `fraction * segment.length`. `1.0` draws it fully, `0.0` not at all.
    fn paint(
        &mut self,
        segment: &PathSegment,
        fraction: f64,
        style: &PaintStyle,
    ) -> RevealResult<()>;
}

#[derive(Clone, Debug, Default)]
/// Painter that only records what it was asked to draw.
pub struct RecordingPainter {
    /// `(path_index, source_order, fraction)` per call, in call order.
    pub calls: Vec<(PathIndex, usize, f64)>,
}

impl Painter for RecordingPainter {
    fn paint(
        &mut self,
        segment: &PathSegment,
        fraction: f64,
        _style: &PaintStyle,
    ) -> RevealResult<()> {
        self.calls
            .push((segment.path_index, segment.source_order, fraction));
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered frame in premultiplied RGBA8.
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the frame as a straight-alpha PNG.
    pub fn to_png(&self, path: &Path) -> RevealResult<()> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| RevealError::validation("frame byte length mismatch"))?;
        img.save(path)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// CPU painter backed by `vello_cpu`.
pub struct CpuPainter {
    width: u16,
    height: u16,
    transform: Affine,
    clear: Option<Rgba8>,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for CpuPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuPainter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("clear", &self.clear)
            .finish()
    }
}

impl CpuPainter {
    /// Painter for a `canvas`-sized surface, cleared to `clear` at every frame start.
    pub fn new(canvas: Canvas, clear: Option<Rgba8>) -> RevealResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| RevealError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| RevealError::validation("canvas height exceeds u16"))?;
        let mut painter = Self {
            width,
            height,
            transform: Affine::IDENTITY,
            clear,
            ctx: vello_cpu::RenderContext::new(width, height),
        };
        painter.begin_frame();
        Ok(painter)
    }

    /// Transform from drawing coordinates to pixels.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Start a new frame on a cleared surface.
    pub fn begin_frame(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some(c) = self.clear {
            self.ctx
                .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    /// Rasterize everything painted since [`CpuPainter::begin_frame`].
    pub fn finish_frame(&mut self) -> FrameRgba {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

impl Painter for CpuPainter {
    fn paint(
        &mut self,
        segment: &PathSegment,
        fraction: f64,
        style: &PaintStyle,
    ) -> RevealResult<()> {
        let trimmed = trim_path(&segment.geometry, fraction);
        if trimmed.elements().is_empty() {
            return Ok(());
        }
        let (color, width) = style.resolve(&segment.style);
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round);

        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(&bezpath_to_cpu(&trimmed));
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/paint/painter.rs"]
mod tests;
