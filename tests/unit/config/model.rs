use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = RevealConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, RevealConfig::default());
    assert_eq!(cfg.order_policy(), OrderPolicy::Original);
}

#[test]
fn full_document_parses() {
    let cfg = RevealConfig::from_json_str(
        r#"{
            "range": {"start": 1, "end": 3},
            "order": "top_to_bottom_left_to_right",
            "weighting": "count",
            "mode": "all_at_once",
            "ease": "in_out_cubic",
            "stroke": {"color": {"r": 10, "g": 20, "b": 30, "a": 255}, "stroke_width": 3.0},
            "fps": {"num": 60, "den": 1},
            "duration_frames": 120,
            "canvas": {"width": 640, "height": 480},
            "scale_to_viewport": false,
            "background": null
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.range, Some(VisibleRange::new(1, 3)));
    assert_eq!(cfg.order_policy(), OrderPolicy::TopToBottomLeftToRight);
    assert_eq!(cfg.weighting, Weighting::Count);
    assert_eq!(cfg.mode, PaintMode::AllAtOnce);
    assert_eq!(cfg.stroke.stroke_width, Some(3.0));
    assert_eq!(cfg.background, None);
}

#[test]
fn unknown_policy_name_is_tolerated() {
    let cfg = RevealConfig::from_json_str(r#"{"order": "spiral"}"#).unwrap();
    assert_eq!(cfg.order_policy(), OrderPolicy::Original);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RevealConfig::from_json_str(r#"{"colour": 1}"#).unwrap_err();
    assert!(matches!(err, RevealError::Serde(_)));
}

#[test]
fn invalid_values_fail_validation() {
    assert!(RevealConfig::from_json_str(r#"{"duration_frames": 0}"#).is_err());
    assert!(RevealConfig::from_json_str(r#"{"fps": {"num": 30, "den": 0}}"#).is_err());
    assert!(RevealConfig::from_json_str(r#"{"canvas": {"width": 0, "height": 10}}"#).is_err());
    let err = RevealConfig::from_json_str(r#"{"range": {"start": 2, "end": 1}}"#).unwrap_err();
    assert!(matches!(err, RevealError::Validation(_)));
    assert!(!err.to_string().contains("no elements"));
    assert!(RevealConfig::from_json_str(r#"{"stroke": {"stroke_width": -1.0}}"#).is_err());
}

#[test]
fn missing_file_is_reported() {
    let err = RevealConfig::from_json_file(Path::new("/no/such/config.json")).unwrap_err();
    assert!(err.to_string().contains("read config"));
}
