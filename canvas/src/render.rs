//! Rendering: builds the display list for a frame and paints it to a 2D context.
//!
//! [`scene`] is a pure function of engine state and returns a list of
//! [`PaintOp`]s. [`paint`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]; it replays a display list and does
//! not read or mutate any engine state. Every frame is a full redraw.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::{Camera, Mapper, Point, Rect};
use crate::consts::DRAFT_DASH_PX;
use crate::doc::{Geometry, ShapeId};
use crate::engine::EngineCore;
use crate::hit::ResizeAnchor;
use crate::input::Draft;
use crate::transform::RenderTransform;

/// Stroke color for drafts whose label is unknown.
const DRAFT_FALLBACK_COLOR: &str = "#FFFFFF";
/// Fill color for resize handles.
const HANDLE_FILL: &str = "#FFFFFF";
/// Alpha of the translucent shape fill.
const FILL_ALPHA: f64 = 0.15;
/// Alpha of the fill on hovered and selected shapes.
const EMPHASIS_FILL_ALPHA: f64 = 0.3;
/// Outline width in screen pixels, per emphasis level.
const LINE_WIDTH_PX: f64 = 2.0;
const HOVER_LINE_WIDTH_PX: f64 = 3.0;
const SELECTED_LINE_WIDTH_PX: f64 = 3.5;

/// How strongly a committed shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Normal,
    Hovered,
    Selected,
}

/// One drawing step. Overlay geometry is in screen (CSS pixel) space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintOp {
    /// Clear the viewport and fill the background.
    Clear { width: f64, height: f64, color: String },
    /// Draw the base image under the camera, rotated and flipped about its center.
    Image {
        camera: Camera,
        transform: RenderTransform,
        /// Fitted size in canvas space.
        width: f64,
        height: f64,
        /// CSS filter string, `"none"` at identity.
        filter: String,
    },
    /// A committed shape outline, closed.
    Shape { id: ShapeId, outline: Vec<Point>, color: String, emphasis: Emphasis },
    /// Square resize handles centered on each point.
    Handles { centers: Vec<Point>, size: f64, color: String },
    /// The in-progress draft, dashed. Polygons are left open.
    Draft { outline: Vec<Point>, closed: bool, color: String },
}

/// Build the display list for the current frame.
///
/// Returns an empty list until the image has loaded. Shapes whose label is
/// missing are skipped, as is everything when annotations are hidden (except
/// the draft).
#[must_use]
pub fn scene(core: &EngineCore) -> Vec<PaintOp> {
    let Some(mapper) = core.mapper() else {
        return Vec::new();
    };

    let mut ops = vec![
        PaintOp::Clear {
            width: core.viewport_width,
            height: core.viewport_height,
            color: core.config.background_color.clone(),
        },
        PaintOp::Image {
            camera: core.camera,
            transform: core.transform.render_transform(mapper.bounds.center()),
            width: mapper.bounds.display_width,
            height: mapper.bounds.display_height,
            filter: core.transform.css_filter(),
        },
    ];

    if core.ui.annotations_visible {
        for (shape, label) in core.shapes.labeled(&core.labels) {
            let emphasis = if core.ui.selected_id == Some(shape.id) {
                Emphasis::Selected
            } else if core.ui.hovered_id == Some(shape.id) {
                Emphasis::Hovered
            } else {
                Emphasis::Normal
            };
            ops.push(PaintOp::Shape {
                id: shape.id,
                outline: outline(&shape.geometry, &mapper),
                color: label.color.clone(),
                emphasis,
            });
        }

        if let Some(selected) = core.selected_shape() {
            if let Some(b) = selected.geometry.as_box() {
                let rect = mapper.normalized_rect_to_screen(b.rect());
                let color = core.labels.get(&selected.label_id).map_or(HANDLE_FILL, |l| l.color.as_str());
                ops.push(PaintOp::Handles {
                    centers: ResizeAnchor::ALL.iter().map(|a| a.position(rect)).collect(),
                    size: core.config.handle_radius_px * 2.0,
                    color: color.to_owned(),
                });
            }
        }
    }

    if let Some((draft, label_id)) = core.draft() {
        let color = core.labels.get(label_id).map_or(DRAFT_FALLBACK_COLOR, |l| l.color.as_str());
        ops.push(PaintOp::Draft {
            outline: outline(&draft.geometry(), &mapper),
            closed: matches!(draft, Draft::Box { .. }),
            color: color.to_owned(),
        });
    }

    ops
}

/// Screen-space outline of a geometry: four corners for a box, the vertices for a polygon.
fn outline(geometry: &Geometry, mapper: &Mapper) -> Vec<Point> {
    match geometry {
        Geometry::Box(b) => rect_corners(mapper.normalized_rect_to_screen(b.rect())),
        Geometry::Polygon { points } => points.iter().map(|p| mapper.to_screen(*p)).collect(),
    }
}

fn rect_corners(r: Rect) -> Vec<Point> {
    vec![
        Point::new(r.x, r.y),
        Point::new(r.x + r.width, r.y),
        Point::new(r.x + r.width, r.y + r.height),
        Point::new(r.x, r.y + r.height),
    ]
}

/// Replay a display list onto `ctx`.
///
/// `image` is skipped when absent. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    ops: &[PaintOp],
    image: Option<&HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    for op in ops {
        match op {
            PaintOp::Clear { width, height, color } => {
                ctx.clear_rect(0.0, 0.0, *width, *height);
                ctx.set_fill_style_str(color);
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            PaintOp::Image { camera, transform, width, height, filter } => {
                if let Some(img) = image {
                    draw_image(ctx, img, camera, transform, *width, *height, filter)?;
                }
            }
            PaintOp::Shape { outline, color, emphasis, .. } => draw_shape(ctx, outline, color, *emphasis),
            PaintOp::Handles { centers, size, color } => draw_handles(ctx, centers, *size, color),
            PaintOp::Draft { outline, closed, color } => draw_draft(ctx, outline, *closed, color)?,
        }
    }
    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn draw_image(
    ctx: &CanvasRenderingContext2d,
    img: &HtmlImageElement,
    camera: &Camera,
    transform: &RenderTransform,
    width: f64,
    height: f64,
    filter: &str,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;
    ctx.translate(transform.center.x, transform.center.y)?;
    ctx.rotate(transform.rotation_rad)?;
    ctx.scale(transform.scale_x, transform.scale_y)?;
    ctx.set_filter(filter);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -width * 0.5, -height * 0.5, width, height)?;
    ctx.restore();
    Ok(())
}

fn draw_shape(ctx: &CanvasRenderingContext2d, outline: &[Point], color: &str, emphasis: Emphasis) {
    if outline.is_empty() {
        return;
    }
    let (line_width, fill_alpha) = match emphasis {
        Emphasis::Normal => (LINE_WIDTH_PX, FILL_ALPHA),
        Emphasis::Hovered => (HOVER_LINE_WIDTH_PX, EMPHASIS_FILL_ALPHA),
        Emphasis::Selected => (SELECTED_LINE_WIDTH_PX, EMPHASIS_FILL_ALPHA),
    };
    ctx.save();
    trace_path(ctx, outline, true);
    ctx.set_fill_style_str(color);
    ctx.set_global_alpha(fill_alpha);
    ctx.fill();
    ctx.set_global_alpha(1.0);
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(line_width);
    ctx.stroke();
    ctx.restore();
}

fn draw_handles(ctx: &CanvasRenderingContext2d, centers: &[Point], size: f64, color: &str) {
    let half = size * 0.5;
    ctx.save();
    ctx.set_fill_style_str(HANDLE_FILL);
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(1.0);
    for c in centers {
        ctx.fill_rect(c.x - half, c.y - half, size, size);
        ctx.stroke_rect(c.x - half, c.y - half, size, size);
    }
    ctx.restore();
}

fn draw_draft(ctx: &CanvasRenderingContext2d, outline: &[Point], closed: bool, color: &str) -> Result<(), JsValue> {
    if outline.is_empty() {
        return Ok(());
    }
    ctx.save();
    let dash_array = js_sys::Array::new();
    dash_array.push(&DRAFT_DASH_PX.into());
    dash_array.push(&DRAFT_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    trace_path(ctx, outline, closed);
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(LINE_WIDTH_PX);
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn trace_path(ctx: &CanvasRenderingContext2d, points: &[Point], closed: bool) {
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    if closed {
        ctx.close_path();
    }
}
