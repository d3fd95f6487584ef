use super::*;
use crate::source::model::PathSegment;

fn segment(d: &str) -> PathSegment {
    PathSegment::new(
        0,
        0,
        BezPath::from_svg(d).unwrap(),
        SegmentStyle::default(),
    )
}

#[test]
fn trim_extremes() {
    let p = BezPath::from_svg("M0,0 L10,0 L10,10").unwrap();
    assert!(trim_path(&p, 0.0).elements().is_empty());
    assert!(trim_path(&p, -1.0).elements().is_empty());
    assert!(trim_path(&p, f64::NAN).elements().is_empty());
    assert_eq!(trim_path(&p, 1.0), p);
}

#[test]
fn trim_stops_at_the_requested_length() {
    let p = BezPath::from_svg("M0,0 L10,0 L10,10").unwrap();
    let half = trim_path(&p, 0.5);
    assert!((half.perimeter(LENGTH_ACCURACY) - 10.0).abs() < 1e-6);

    let three_quarters = trim_path(&p, 0.75);
    assert!((three_quarters.perimeter(LENGTH_ACCURACY) - 15.0).abs() < 1e-6);
    let end = three_quarters.segments().last().unwrap().end();
    assert!((end.x - 10.0).abs() < 1e-6 && (end.y - 5.0).abs() < 1e-6);
}

#[test]
fn trim_follows_curves_and_closing_edges() {
    let curve = BezPath::from_svg("M0,0 C0,50 100,50 100,0").unwrap();
    let total = curve.perimeter(LENGTH_ACCURACY);
    let part = trim_path(&curve, 0.3);
    assert!((part.perimeter(LENGTH_ACCURACY) - 0.3 * total).abs() < 1e-2);

    let square = BezPath::from_svg("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
    assert!((square.perimeter(LENGTH_ACCURACY) - 40.0).abs() < 1e-6);
    let most = trim_path(&square, 0.9);
    assert!((most.perimeter(LENGTH_ACCURACY) - 36.0).abs() < 1e-6);
}

#[test]
fn style_resolution_prefers_overrides() {
    let seg = SegmentStyle {
        stroke: None,
        stroke_width: 2.0,
        fill: Some(Rgba8::opaque(0, 128, 0)),
    };
    assert_eq!(
        PaintStyle::default().resolve(&seg),
        (Rgba8::opaque(0, 128, 0), 2.0)
    );
    let over = PaintStyle {
        color: Some(Rgba8::opaque(1, 1, 1)),
        stroke_width: Some(5.0),
    };
    assert_eq!(over.resolve(&seg), (Rgba8::opaque(1, 1, 1), 5.0));
    assert!(
        PaintStyle {
            stroke_width: Some(f64::INFINITY),
            ..PaintStyle::default()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn recording_painter_keeps_call_order() {
    let mut p = RecordingPainter::default();
    let s = segment("M0,0 L1,0");
    p.paint(&s, 1.0, &PaintStyle::default()).unwrap();
    p.paint(&s, 0.25, &PaintStyle::default()).unwrap();
    assert_eq!(p.calls, vec![(0, 0, 1.0), (0, 0, 0.25)]);
}

#[test]
fn cpu_painter_draws_only_the_revealed_part() {
    let canvas = Canvas {
        width: 64,
        height: 64,
    };
    let mut painter = CpuPainter::new(canvas, Some(Rgba8::opaque(255, 255, 255))).unwrap();
    let style = PaintStyle {
        color: Some(Rgba8::BLACK),
        stroke_width: Some(4.0),
    };
    painter
        .paint(&segment("M8,32 L56,32"), 0.5, &style)
        .unwrap();
    let frame = painter.finish_frame();
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert_eq!(frame.pixel(16, 32), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(48, 32), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(64, 0), None);
}

#[test]
fn cpu_painter_rejects_oversized_canvas() {
    let canvas = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(CpuPainter::new(canvas, None).is_err());
}

#[test]
fn pixel_lookup_on_huge_dimensions_stays_in_bounds() {
    let frame = FrameRgba {
        width: 65_535,
        height: 65_535,
        data: vec![0; 4],
    };
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(65_534, 65_534), None);
}
