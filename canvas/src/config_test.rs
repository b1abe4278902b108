#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_consts() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.min_zoom, MIN_ZOOM);
    assert_eq!(cfg.max_zoom, MAX_ZOOM);
    assert_eq!(cfg.min_shape_px, MIN_SHAPE_PX);
    assert_eq!(cfg.paste_offset, PASTE_OFFSET);
    assert_eq!(cfg.background_color, BACKGROUND_COLOR);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: EngineConfig = serde_json::from_str(r#"{ "max_zoom": 8.0, "paste_offset": 0.1 }"#).unwrap();
    assert_eq!(cfg.max_zoom, 8.0);
    assert_eq!(cfg.paste_offset, 0.1);
    assert_eq!(cfg.min_zoom, MIN_ZOOM);
    assert_eq!(cfg.handle_radius_px, HANDLE_RADIUS_PX);
}

#[test]
fn clamp_zoom_respects_range() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.clamp_zoom(0.01), MIN_ZOOM);
    assert_eq!(cfg.clamp_zoom(100.0), MAX_ZOOM);
    assert_eq!(cfg.clamp_zoom(2.0), 2.0);
}

#[test]
fn clamp_zoom_tolerates_inverted_range() {
    let cfg = EngineConfig { min_zoom: 4.0, max_zoom: 1.0, ..Default::default() };
    assert_eq!(cfg.clamp_zoom(10.0), 4.0);
    assert_eq!(cfg.clamp_zoom(0.1), 1.0);
}
