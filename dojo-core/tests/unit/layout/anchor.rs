use super::*;

const EPS: f64 = 1e-12;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

#[test]
fn point_anchor_is_centered_on_anchor() {
    let metrics = AnchorMetrics::default();
    for preset in AnchorPreset::point_presets() {
        let anchor = preset.anchor();
        let r = resolve_preview_rect(&anchor, &metrics);
        assert_eq!(r.width, metrics.size);
        assert_eq!(r.height, metrics.size);
        let c = r.center();
        assert_close(c.x, anchor.min().x);
        assert_close(c.y, 1.0 - anchor.min().y);
    }
}

#[test]
fn stretch_all_insets_by_margin() {
    let r = AnchorPreset::StretchAll.anchor().preview();
    let m = AnchorMetrics::default().margin;
    assert_eq!(
        r,
        PreviewRect {
            left: m,
            top: m,
            width: 1.0 - 2.0 * m,
            height: 1.0 - 2.0 * m,
        }
    );
}

#[test]
fn narrow_stretch_axis_is_floored_at_half_size() {
    let r = AnchorPreset::StretchH.anchor().preview();
    assert_close(r.left, 0.04);
    assert_close(r.top, 0.46);
    assert_close(r.width, 0.92);
    assert_close(r.height, 0.11);

    let r = AnchorPreset::StretchV.anchor().preview();
    assert_close(r.left, 0.54);
    assert_close(r.top, 0.04);
    assert_close(r.width, 0.11);
    assert_close(r.height, 0.92);
}

#[test]
fn stretch_left_edge_ignores_which_axis_stretches() {
    let metrics = AnchorMetrics::new(0.2, 0.05).unwrap();
    let vertical = AnchorRect::new(Point::new(0.3, 0.1), Point::new(0.3, 0.8)).unwrap();
    let r = resolve_preview_rect(&vertical, &metrics);
    assert_close(r.left, 0.35);
    assert_close(r.top, 0.25);
    assert_close(r.width, 0.1);

    let horizontal = AnchorRect::new(Point::new(0.1, 0.7), Point::new(0.9, 0.7)).unwrap();
    let r = resolve_preview_rect(&horizontal, &metrics);
    assert_close(r.left, 0.15);
    assert_close(r.top, 0.25);
    assert_close(r.height, 0.1);
}

#[test]
fn resolver_is_pure() {
    let anchor = AnchorRect::new(Point::new(0.1, 0.2), Point::new(0.7, 0.9)).unwrap();
    let metrics = AnchorMetrics::new(0.3, 0.05).unwrap();
    let a = resolve_preview_rect(&anchor, &metrics);
    let b = resolve_preview_rect(&anchor, &metrics);
    assert_eq!(a.left.to_bits(), b.left.to_bits());
    assert_eq!(a.top.to_bits(), b.top.to_bits());
    assert_eq!(a.width.to_bits(), b.width.to_bits());
    assert_eq!(a.height.to_bits(), b.height.to_bits());
}

#[test]
fn inverted_or_out_of_range_anchors_are_rejected() {
    assert!(AnchorRect::new(Point::new(0.6, 0.0), Point::new(0.4, 1.0)).is_err());
    assert!(AnchorRect::new(Point::new(0.0, 0.6), Point::new(1.0, 0.4)).is_err());
    assert!(AnchorRect::point(1.5, 0.0).is_err());
    assert!(AnchorRect::point(f64::NAN, 0.0).is_err());
}

#[test]
fn anchor_json_goes_through_validation() {
    let ok: AnchorRect = serde_json::from_str(r#"{"min":[0,0],"max":[1,0.5]}"#).unwrap();
    assert!(ok.stretches_x());
    assert!(!ok.stretches_y());
    assert!(serde_json::from_str::<AnchorRect>(r#"{"min":[1,0],"max":[0,0]}"#).is_err());
}

#[test]
fn metrics_validation() {
    assert!(AnchorMetrics::new(0.0, 0.04).is_err());
    assert!(AnchorMetrics::new(0.22, -0.01).is_err());
    assert!(AnchorMetrics::default().validate().is_ok());
}

#[test]
fn presets_parse_and_lay_out_in_grid() {
    assert_eq!("stretch-all".parse::<AnchorPreset>().unwrap(), AnchorPreset::StretchAll);
    assert_eq!(" Center ".parse::<AnchorPreset>().unwrap(), AnchorPreset::Center);
    assert!("middle".parse::<AnchorPreset>().is_err());
    assert_eq!(AnchorPreset::TopLeft.grid_cell(), (0, 0));
    assert_eq!(AnchorPreset::Right.grid_cell(), (1, 2));
    assert_eq!(AnchorPreset::StretchAll.grid_cell(), (3, 2));
}

#[test]
fn scaled_and_nested_rects() {
    let r = AnchorPreset::StretchAll.anchor().preview();
    let px = r.scaled(Viewport::new(100.0, 200.0).unwrap());
    assert_close(px.x0, 4.0);
    assert_close(px.y0, 8.0);
    assert_close(px.x1, 96.0);
    assert_close(px.y1, 192.0);

    let parent = PreviewRect {
        left: 0.5,
        top: 0.0,
        width: 0.5,
        height: 0.5,
    };
    let nested = parent.nest(&PreviewRect::UNIT);
    assert_eq!(nested, parent);
}
