#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_is_draw() {
    assert!(Tool::Box.is_draw());
    assert!(Tool::Polygon.is_draw());
    assert!(!Tool::Select.is_draw());
    assert!(!Tool::Pan.is_draw());
}

#[test]
fn tool_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Polygon).unwrap(), "\"polygon\"");
    let t: Tool = serde_json::from_str("\"pan\"").unwrap();
    assert_eq!(t, Tool::Pan);
}

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.command());
}

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Default::default() }.command());
}

#[test]
fn key_as_char() {
    assert_eq!(Key::new("c").as_char(), Some('c'));
    assert_eq!(Key::new("Escape").as_char(), None);
    assert_eq!(Key::new("").as_char(), None);
    assert!(Key::new("V").is_char('v'));
    assert!(!Key::new("Delete").is_char('d'));
}

// =============================================================
// InputEvent serde
// =============================================================

#[test]
fn pointer_down_defaults_button_and_modifiers() {
    let ev: InputEvent = serde_json::from_value(json!({ "type": "pointer_down", "x": 10.0, "y": 20.0 })).unwrap();
    assert_eq!(
        ev,
        InputEvent::PointerDown { x: 10.0, y: 20.0, button: Button::Primary, modifiers: Modifiers::default() }
    );
}

#[test]
fn wheel_event_defaults_dx() {
    let ev: InputEvent = serde_json::from_value(json!({ "type": "wheel", "x": 1.0, "y": 2.0, "dy": -120.0 })).unwrap();
    let InputEvent::Wheel { dx, dy, .. } = ev else {
        panic!("expected wheel");
    };
    assert_eq!(dx, 0.0);
    assert_eq!(dy, -120.0);
}

#[test]
fn key_down_with_modifiers() {
    let ev: InputEvent =
        serde_json::from_value(json!({ "type": "key_down", "key": "c", "modifiers": { "ctrl": true } })).unwrap();
    let InputEvent::KeyDown { key, modifiers } = ev else {
        panic!("expected key_down");
    };
    assert_eq!(key, Key::new("c"));
    assert!(modifiers.ctrl);
    assert!(!modifiers.meta);
}

#[test]
fn pointer_leave_has_no_fields() {
    let ev: InputEvent = serde_json::from_value(json!({ "type": "pointer_leave" })).unwrap();
    assert_eq!(ev, InputEvent::PointerLeave);
}

// =============================================================
// UiState / InputState / Draft
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selected_id.is_none());
    assert!(ui.hovered_id.is_none());
    assert!(ui.active_label.is_none());
    assert!(!ui.locked);
    assert!(ui.annotations_visible);
    assert_eq!(ui.cursor, "default");
}

#[test]
fn input_state_default_is_idle() {
    let s = InputState::default();
    assert!(matches!(s, InputState::Idle));
    assert!(!s.is_active());
    assert!(InputState::Panning { last_screen: Point::new(0.0, 0.0) }.is_active());
}

#[test]
fn box_draft_normalizes_drag_direction() {
    let d = Draft::Box { anchor: Point::new(0.5, 0.6), current: Point::new(0.2, 0.1) };
    let g = d.geometry();
    let b = g.as_box().unwrap();
    assert_eq!(b.x, 0.2);
    assert_eq!(b.y, 0.1);
    assert!((b.width - 0.3).abs() < 1e-9);
    assert!((b.height - 0.5).abs() < 1e-9);
}

#[test]
fn polygon_draft_geometry_copies_points() {
    let pts = vec![Point::new(0.1, 0.1), Point::new(0.2, 0.2)];
    let d = Draft::Polygon { points: pts.clone(), last_screen: Point::new(0.0, 0.0) };
    assert_eq!(d.geometry(), Geometry::Polygon { points: pts });
}
