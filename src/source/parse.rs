use std::path::PathBuf;

use anyhow::Context;

use crate::{
    foundation::core::{BezPath, Point, Rgba8},
    foundation::error::{RevealError, RevealResult},
    source::model::{Drawing, RawElement, SegmentStyle},
};

#[derive(Clone, Debug)]
/// Where a drawing comes from.
pub enum Source {
    /// SVG document on disk.
    SvgFile(PathBuf),
    /// SVG document already in memory.
    SvgData(Vec<u8>),
    /// Explicit list of SVG path `d` strings, one element each.
    PathData(Vec<String>),
}

/// Parse a source into a flat drawing with dense path indices.
///
/// Safe to call again after the source changes; nothing is cached between calls.
#[tracing::instrument(skip(source))]
pub fn parse(source: &Source) -> RevealResult<Drawing> {
    let raw = match source {
        Source::SvgFile(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
            svg_elements(&bytes)?
        }
        Source::SvgData(bytes) => svg_elements(bytes)?,
        Source::PathData(paths) => path_elements(paths)?,
    };
    let drawing = Drawing::from_raw(raw);
    tracing::debug!(
        elements = drawing.elements.len(),
        segments = drawing.segments.len(),
        "parsed drawing"
    );
    Ok(drawing)
}

fn path_elements(paths: &[String]) -> RevealResult<Vec<RawElement>> {
    paths
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let path = BezPath::from_svg(d.trim())
                .map_err(|e| RevealError::source_parse(format!("path data #{i}: {e}")))?;
            Ok(RawElement {
                id: None,
                path,
                style: SegmentStyle::default(),
            })
        })
        .collect()
}

fn svg_elements(bytes: &[u8]) -> RevealResult<Vec<RawElement>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| RevealError::source_parse(format!("parse svg tree: {e}")))?;
    let mut out = Vec::new();
    collect_paths(tree.root(), &mut out);
    Ok(out)
}

fn collect_paths(group: &usvg::Group, out: &mut Vec<RawElement>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_paths(g, out),
            usvg::Node::Path(p) => {
                if !p.is_visible() {
                    continue;
                }
                let ts = p.abs_transform();
                let affine = kurbo::Affine::new([
                    f64::from(ts.sx),
                    f64::from(ts.ky),
                    f64::from(ts.kx),
                    f64::from(ts.sy),
                    f64::from(ts.tx),
                    f64::from(ts.ty),
                ]);
                let path = affine * tiny_path_to_kurbo(p.data());
                let id = Some(p.id().to_string()).filter(|s| !s.is_empty());
                out.push(RawElement {
                    id,
                    path,
                    style: style_of(p, affine.determinant().abs().sqrt()),
                });
            }
            _ => {}
        }
    }
}

fn tiny_path_to_kurbo(path: &usvg::tiny_skia_path::Path) -> BezPath {
    use usvg::tiny_skia_path::PathSegment as Seg;

    let pt = |p: usvg::tiny_skia_path::Point| Point::new(f64::from(p.x), f64::from(p.y));
    let mut out = BezPath::new();
    for seg in path.segments() {
        match seg {
            Seg::MoveTo(p) => out.move_to(pt(p)),
            Seg::LineTo(p) => out.line_to(pt(p)),
            Seg::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            Seg::CubicTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            Seg::Close => out.close_path(),
        }
    }
    out
}

fn style_of(p: &usvg::Path, scale: f64) -> SegmentStyle {
    let color = |paint: &usvg::Paint, opacity: f32| match paint {
        usvg::Paint::Color(c) => {
            Some(Rgba8::opaque(c.red, c.green, c.blue).with_opacity(f64::from(opacity)))
        }
        // Gradients and patterns collapse to black; only the reveal geometry matters here.
        _ => Some(Rgba8::BLACK.with_opacity(f64::from(opacity))),
    };

    let stroke = p
        .stroke()
        .and_then(|s| color(s.paint(), s.opacity().get()));
    let stroke_width = p
        .stroke()
        .map(|s| f64::from(s.width().get()) * scale)
        .unwrap_or(1.0);
    let fill = p.fill().and_then(|f| color(f.paint(), f.opacity().get()));

    SegmentStyle {
        stroke,
        stroke_width,
        fill,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/parse.rs"]
mod tests;
