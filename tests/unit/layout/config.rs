use super::*;

#[test]
fn defaults_validate() {
    LayoutConfig::default().validate().unwrap();
}

#[test]
fn unknown_groups_use_fallback_anchor() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.anchor_for("Birds"), Point::new(945.0, 495.0));
    assert_eq!(cfg.anchor_for("Fungi"), Point::new(600.0, 400.0));
}

#[test]
fn rejects_degenerate_geometry() {
    let mut cfg = LayoutConfig::default();
    cfg.leaf_radius = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = LayoutConfig::default();
    cfg.grid.circles_per_column = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = LayoutConfig::default();
    cfg.grid.band_padding = 1.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: LayoutConfig = serde_json::from_str(r#"{"leaf_radius": 6.0}"#).unwrap();
    assert_eq!(cfg.leaf_radius, 6.0);
    assert_eq!(cfg.grid.circles_per_column, 3);
    assert_eq!(cfg.grid_pitch(), 16.0);
}
