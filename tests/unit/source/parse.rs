use super::*;

const SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <path id="first" d="M10,10 L90,10" stroke="#ff0000" stroke-width="2" fill="none"/>
  <g transform="translate(0,50)">
    <path d="M10,0 L90,0 M10,20 L90,20" stroke="blue" fill="none"/>
  </g>
  <path d="M0,0 L1,1" stroke="black" visibility="hidden"/>
</svg>"##;

#[test]
fn svg_elements_are_indexed_in_declaration_order() {
    let d = parse(&Source::SvgData(SVG.to_vec())).unwrap();
    assert_eq!(d.elements.len(), 2);
    assert_eq!(d.elements[0].id.as_deref(), Some("first"));
    assert_eq!(d.elements[1].segment_count, 2);
    assert_eq!(d.segments.len(), 3);

    let style = d.elements[0].style;
    assert_eq!(style.stroke, Some(Rgba8::opaque(255, 0, 0)));
    assert!((style.stroke_width - 2.0).abs() < 1e-6);
    assert_eq!(style.fill, None);
}

#[test]
fn svg_group_transform_is_applied() {
    let d = parse(&Source::SvgData(SVG.to_vec())).unwrap();
    let b = d.segments[1].bounds;
    assert!((b.y0 - 50.0).abs() < 1e-3);
    assert!((d.segments[1].length - 80.0).abs() < 1e-3);
}

#[test]
fn path_data_source_uses_default_style() {
    let d = parse(&Source::PathData(vec![
        "M0,0 L10,0".to_string(),
        "  M0,0 L0,10 ".to_string(),
    ]))
    .unwrap();
    assert_eq!(d.max_path_index(), Some(1));
    assert_eq!(d.elements[1].style, SegmentStyle::default());
}

#[test]
fn bad_sources_fail_with_parse_errors() {
    let err = parse(&Source::SvgData(b"<svg".to_vec())).unwrap_err();
    assert!(matches!(err, RevealError::SourceParse(_)));

    let err = parse(&Source::PathData(vec!["M0,0 Lnope".to_string()])).unwrap_err();
    assert!(matches!(err, RevealError::SourceParse(_)));

    let err = parse(&Source::SvgFile("/definitely/not/here.svg".into())).unwrap_err();
    assert!(matches!(err, RevealError::Other(_)));
}

#[test]
fn parse_is_reentrant() {
    let src = Source::SvgData(SVG.to_vec());
    let a = parse(&src).unwrap();
    let b = parse(&src).unwrap();
    assert_eq!(a.segments.len(), b.segments.len());
    assert_eq!(a.bounds, b.bounds);
}
