use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn secs_to_frames_rounds_up() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(1.0), 30);
    assert_eq!(fps.secs_to_frames_ceil(1.01), 31);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
}

#[test]
fn fit_transform_centers_and_scales() {
    let content = Rect::new(10.0, 10.0, 20.0, 30.0);
    let canvas = Canvas {
        width: 100,
        height: 100,
    };
    let t = fit_transform(content, canvas);
    let top_left = t * Point::new(10.0, 10.0);
    let bottom_right = t * Point::new(20.0, 30.0);
    assert!((top_left.y - 0.0).abs() < 1e-9);
    assert!((bottom_right.y - 100.0).abs() < 1e-9);
    assert!((top_left.x - 25.0).abs() < 1e-9);
    assert!((bottom_right.x - 75.0).abs() < 1e-9);
}

#[test]
fn fit_transform_degenerate_is_identity() {
    let t = fit_transform(Rect::new(0.0, 0.0, 0.0, 10.0), Canvas::default());
    assert_eq!(t, Affine::IDENTITY);
}

#[test]
fn opacity_scales_alpha() {
    assert_eq!(Rgba8::opaque(1, 2, 3).with_opacity(0.5).a, 128);
    assert_eq!(Rgba8::BLACK.with_opacity(2.0).a, 255);
}
