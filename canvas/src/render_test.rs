#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{BoxGeom, Label, Shape};
use crate::input::{Button, Modifiers, Tool};
use crate::transform::ImageTransform;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn label(id: &str, color: &str) -> Label {
    Label { id: id.to_owned(), name: id.to_owned(), color: color.to_owned(), hotkey: None }
}

fn core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(500.0, 500.0, 1.0);
    core.on_image_loaded(500.0, 500.0);
    core.set_labels(vec![label("car", "#FF0000")]);
    core.set_active_label(Some("car".to_owned()));
    core
}

fn boxed(label_id: &str) -> Shape {
    Shape::new(label_id, Geometry::Box(BoxGeom::new(0.1, 0.1, 0.2, 0.2)))
}

fn shape_ops(ops: &[PaintOp]) -> Vec<(ShapeId, Emphasis)> {
    ops.iter()
        .filter_map(|op| match op {
            PaintOp::Shape { id, emphasis, .. } => Some((*id, *emphasis)),
            _ => None,
        })
        .collect()
}

// =============================================================
// Frame structure
// =============================================================

#[test]
fn nothing_renders_before_image_load() {
    let mut core = EngineCore::new();
    core.set_viewport(500.0, 500.0, 1.0);
    core.set_shapes(vec![boxed("car")]);
    assert!(scene(&core).is_empty());
}

#[test]
fn frame_starts_with_clear_then_image() {
    let core = core();
    let ops = scene(&core);
    assert_eq!(ops.len(), 2);
    assert_eq!(
        ops[0],
        PaintOp::Clear { width: 500.0, height: 500.0, color: core.config.background_color.clone() }
    );
    let PaintOp::Image { transform, width, height, filter, .. } = &ops[1] else {
        panic!("expected image op");
    };
    assert_eq!((*width, *height), (500.0, 500.0));
    assert_eq!(transform.center, Point::new(250.0, 250.0));
    assert_eq!(filter, "none");
}

#[test]
fn image_op_carries_transform_and_filter() {
    let mut core = core();
    core.set_transform(ImageTransform { rotation_deg: 450.0, flip_h: true, brightness: 150.0, ..Default::default() });
    let ops = scene(&core);
    let PaintOp::Image { transform, filter, .. } = &ops[1] else {
        panic!("expected image op");
    };
    assert!(approx_eq(transform.rotation_rad, std::f64::consts::FRAC_PI_2));
    assert_eq!(transform.scale_x, -1.0);
    assert_eq!(transform.scale_y, 1.0);
    assert_eq!(filter, "brightness(150%) contrast(100%) saturate(100%)");
}

// =============================================================
// Shapes
// =============================================================

#[test]
fn orphan_shape_is_omitted() {
    let mut core = core();
    let good = boxed("car");
    let orphan = boxed("deleted-label");
    core.set_shapes(vec![orphan, good.clone()]);
    let ops = scene(&core);
    assert_eq!(shape_ops(&ops), vec![(good.id, Emphasis::Normal)]);
}

#[test]
fn shape_outline_follows_camera() {
    let mut core = core();
    core.set_shapes(vec![boxed("car")]);
    core.camera.zoom = 2.0;
    core.camera.pan_x = 10.0;
    core.camera.pan_y = 20.0;
    let ops = scene(&core);
    let Some(PaintOp::Shape { outline, color, .. }) = ops.iter().find(|op| matches!(op, PaintOp::Shape { .. })) else {
        panic!("expected shape op");
    };
    assert_eq!(color, "#FF0000");
    assert_eq!(outline.len(), 4);
    assert!(approx_eq(outline[0].x, 110.0) && approx_eq(outline[0].y, 120.0));
    assert!(approx_eq(outline[2].x, 310.0) && approx_eq(outline[2].y, 320.0));
}

#[test]
fn polygon_outline_is_its_vertices() {
    let mut core = core();
    let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.5, 1.0)];
    core.set_shapes(vec![Shape::new("car", Geometry::Polygon { points })]);
    let ops = scene(&core);
    let Some(PaintOp::Shape { outline, .. }) = ops.last() else {
        panic!("expected shape op");
    };
    assert_eq!(outline, &vec![Point::new(0.0, 0.0), Point::new(500.0, 0.0), Point::new(250.0, 500.0)]);
}

#[test]
fn selected_box_has_emphasis_and_handles() {
    let mut core = core();
    let a = boxed("car");
    let b = Shape::new("car", Geometry::Box(BoxGeom::new(0.5, 0.5, 0.2, 0.2)));
    core.set_shapes(vec![a.clone(), b.clone()]);
    core.ui.selected_id = Some(a.id);
    core.ui.hovered_id = Some(b.id);
    let ops = scene(&core);
    assert_eq!(shape_ops(&ops), vec![(a.id, Emphasis::Selected), (b.id, Emphasis::Hovered)]);
    let Some(PaintOp::Handles { centers, size, .. }) = ops.last() else {
        panic!("expected handles op");
    };
    assert_eq!(centers.len(), 8);
    assert!(centers.iter().any(|c| approx_eq(c.x, 50.0) && approx_eq(c.y, 50.0)));
    assert!(centers.iter().any(|c| approx_eq(c.x, 150.0) && approx_eq(c.y, 100.0)));
    assert_eq!(*size, 12.0);
}

#[test]
fn selected_polygon_has_no_handles() {
    let mut core = core();
    let points = vec![Point::new(0.1, 0.1), Point::new(0.4, 0.1), Point::new(0.2, 0.4)];
    let shape = Shape::new("car", Geometry::Polygon { points });
    core.ui.selected_id = Some(shape.id);
    core.set_shapes(vec![shape]);
    assert!(!scene(&core).iter().any(|op| matches!(op, PaintOp::Handles { .. })));
}

#[test]
fn hidden_annotations_paint_no_shapes() {
    let mut core = core();
    let s = boxed("car");
    core.ui.selected_id = Some(s.id);
    core.set_shapes(vec![s]);
    core.set_annotations_visible(false);
    let ops = scene(&core);
    assert_eq!(ops.len(), 2);
}

// =============================================================
// Draft
// =============================================================

#[test]
fn box_draft_is_closed() {
    let mut core = core();
    core.set_tool(Tool::Box);
    core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(Point::new(150.0, 100.0), Modifiers::default());
    let ops = scene(&core);
    let Some(PaintOp::Draft { outline, closed, color }) = ops.last() else {
        panic!("expected draft op");
    };
    assert!(*closed);
    assert_eq!(color, "#FF0000");
    assert!(approx_eq(outline[2].x, 150.0) && approx_eq(outline[2].y, 100.0));
}

#[test]
fn polygon_draft_is_open() {
    let mut core = core();
    core.set_tool(Tool::Polygon);
    core.on_pointer_down(Point::new(50.0, 50.0), Button::Primary, Modifiers::default());
    core.on_pointer_move(Point::new(150.0, 50.0), Modifiers::default());
    let ops = scene(&core);
    let Some(PaintOp::Draft { outline, closed, .. }) = ops.last() else {
        panic!("expected draft op");
    };
    assert!(!*closed);
    assert_eq!(outline.len(), 2);
}

#[test]
fn paint_ops_serialize_tagged() {
    let mut core = core();
    core.set_shapes(vec![boxed("car")]);
    let v = serde_json::to_value(scene(&core)).unwrap();
    assert_eq!(v[0]["op"], "clear");
    assert_eq!(v[1]["op"], "image");
    assert_eq!(v[2]["op"], "shape");
    assert_eq!(v[2]["emphasis"], "normal");
}
