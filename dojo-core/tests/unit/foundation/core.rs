use super::*;

#[test]
fn viewport_rejects_degenerate_sides() {
    assert!(Viewport::new(0.0, 10.0).is_err());
    assert!(Viewport::new(10.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    let vp = Viewport::new(280.0, 322.0).unwrap();
    assert_eq!(vp.size(), Size::new(280.0, 322.0));
}

#[test]
fn ensure_unit_bounds_are_inclusive() {
    assert!(ensure_unit(0.0, "x").is_ok());
    assert!(ensure_unit(1.0, "x").is_ok());
    assert!(ensure_unit(1.0001, "x").is_err());
    assert!(ensure_unit(-0.1, "x").is_err());
    assert!(ensure_unit(f64::INFINITY, "x").is_err());
}
