//! Engine: the interaction state machine and its browser wrapper.
//!
//! [`EngineCore`] holds all logic that does not depend on the canvas element,
//! so it can be driven and tested natively. [`Engine`] owns the
//! `HtmlCanvasElement` and the loaded image and delegates everything else.
//!
//! The engine never mutates the shape list. Every edit is returned as an
//! [`Action`] for the host to forward to its store; the store's new list comes
//! back through [`EngineCore::set_shapes`].

use serde::Serialize;
use tracing::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::{Camera, ImageBounds, Mapper, Point};
use crate::config::EngineConfig;
use crate::doc::{Geometry, Label, LabelId, LabelSet, PartialShape, Shape, ShapeId, ShapeList};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, Clipboard, Draft, InputEvent, InputState, Key, Modifiers, Tool, UiState};
use crate::render;
use crate::transform::ImageTransform;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ShapeCreated(Shape),
    ShapeUpdated { id: ShapeId, fields: PartialShape },
    ShapeDeleted { id: ShapeId },
    SelectionChanged(Option<ShapeId>),
    HoverChanged(Option<ShapeId>),
    ImageLoaded { width: f64, height: f64 },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub shapes: ShapeList,
    pub labels: LabelSet,
    pub camera: Camera,
    pub transform: ImageTransform,
    pub ui: UiState,
    pub input: InputState,
    pub clipboard: Option<Clipboard>,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Natural size of the loaded image, once the load callback has fired.
    pub image_size: Option<(f64, f64)>,
    /// Letterboxed image rectangle; `None` until an image and a viewport exist.
    pub bounds: Option<ImageBounds>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            shapes: ShapeList::default(),
            labels: LabelSet::default(),
            camera: Camera::default(),
            transform: ImageTransform::default(),
            ui: UiState::default(),
            input: InputState::default(),
            clipboard: None,
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            image_size: None,
            bounds: None,
        }
    }

    // --- Data inputs ---

    /// Replace the shape list with the store's current contents.
    ///
    /// A selection, hover, or edit gesture whose shape disappeared is dropped.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        self.shapes.replace(shapes);
        let mut actions = Vec::new();
        if let Some(id) = self.ui.selected_id {
            if self.shapes.get(&id).is_none() {
                self.ui.selected_id = None;
                actions.push(Action::SelectionChanged(None));
            }
        }
        if let Some(id) = self.ui.hovered_id {
            if self.shapes.get(&id).is_none() {
                self.ui.hovered_id = None;
                actions.push(Action::HoverChanged(None));
            }
        }
        let edited = match &self.input {
            InputState::Moving { id, .. } | InputState::Resizing { id, .. } => Some(*id),
            _ => None,
        };
        if edited.is_some_and(|id| self.shapes.get(&id).is_none()) {
            debug!("edited shape removed by store; gesture abandoned");
            self.input = InputState::Idle;
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Replace the label set. Shapes whose label vanished become orphans,
    /// and a selection, hover, or edit gesture on an orphan is dropped.
    pub fn set_labels(&mut self, labels: Vec<Label>) -> Vec<Action> {
        self.labels = LabelSet::new(labels);
        let mut actions = Vec::new();
        if self.ui.selected_id.is_some() && self.selected_shape().is_none() {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        if self.ui.hovered_id.is_some_and(|id| self.labeled_shape(&id).is_none()) {
            self.ui.hovered_id = None;
            actions.push(Action::HoverChanged(None));
        }
        let edited = match &self.input {
            InputState::Moving { id, .. } | InputState::Resizing { id, .. } => Some(*id),
            _ => None,
        };
        if edited.is_some_and(|id| self.labeled_shape(&id).is_none()) {
            debug!("edited shape lost its label; gesture abandoned");
            self.input = InputState::Idle;
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set the label assigned to new and pasted shapes.
    pub fn set_active_label(&mut self, label_id: Option<LabelId>) {
        self.ui.active_label = label_id;
    }

    /// Set the active tool. A draft in progress is discarded.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        let mut actions = Vec::new();
        if matches!(self.input, InputState::Drawing { .. }) {
            self.input = InputState::Idle;
            actions.push(Action::RenderNeeded);
        }
        if !self.input.is_active() {
            self.set_cursor(self.idle_cursor(None), &mut actions);
        }
        actions
    }

    /// Set rotation, flips, and filters for the base image.
    pub fn set_transform(&mut self, transform: ImageTransform) -> Vec<Action> {
        self.transform = transform.clamped();
        vec![Action::RenderNeeded]
    }

    /// Lock or unlock editing. Locking abandons any edit in progress.
    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        self.ui.locked = locked;
        let editing = matches!(
            self.input,
            InputState::Drawing { .. } | InputState::Moving { .. } | InputState::Resizing { .. }
        );
        if locked && editing {
            self.input = InputState::Idle;
        }
        vec![Action::RenderNeeded]
    }

    /// Show or hide annotations. Hidden shapes are neither painted nor hit-tested.
    pub fn set_annotations_visible(&mut self, visible: bool) -> Vec<Action> {
        self.ui.annotations_visible = visible;
        let mut actions = Vec::new();
        if !visible && self.ui.hovered_id.is_some() {
            self.ui.hovered_id = None;
            actions.push(Action::HoverChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.refit();
        vec![Action::RenderNeeded]
    }

    /// Image load completion: records the natural size, fits the image into
    /// the viewport, and resets the view.
    pub fn on_image_loaded(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.image_size = Some((width, height));
        self.refit();
        self.camera = Camera::default();
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        if self.ui.hovered_id.take().is_some() {
            actions.push(Action::HoverChanged(None));
        }
        info!(width, height, fitted = self.bounds.is_some(), "image loaded");
        actions.push(Action::ImageLoaded { width, height });
        actions.push(Action::RenderNeeded);
        actions
    }

    fn refit(&mut self) {
        self.bounds = self
            .image_size
            .and_then(|(w, h)| ImageBounds::fit(w, h, self.viewport_width, self.viewport_height));
    }

    // --- Input events ---

    /// Route one raw input event to its handler.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, button, modifiers } => {
                self.on_pointer_down(Point::new(x, y), button, modifiers)
            }
            InputEvent::PointerMove { x, y, modifiers } => self.on_pointer_move(Point::new(x, y), modifiers),
            InputEvent::PointerUp { x, y, button, modifiers } => self.on_pointer_up(Point::new(x, y), button, modifiers),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Wheel { x, y, dx, dy, modifiers } => self.on_wheel(Point::new(x, y), dx, dy, modifiers),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(&key, modifiers),
        }
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();

        if button == Button::Middle
            || (button == Button::Primary && modifiers.command())
            || (button == Button::Primary && self.ui.tool == Tool::Pan)
        {
            if matches!(self.input, InputState::Drawing { .. }) {
                debug!("draft discarded by pan");
            }
            self.input = InputState::Panning { last_screen: screen };
            self.set_cursor("grabbing", &mut actions);
            actions.push(Action::RenderNeeded);
            return actions;
        }

        if button != Button::Primary || self.input.is_active() {
            return actions;
        }
        let Some(mapper) = self.mapper() else {
            return actions;
        };

        match self.hit_at(&mapper, screen) {
            Some(Hit { shape_id, part }) => self.begin_edit(shape_id, part, screen, &mapper, &mut actions),
            None => {
                self.select(None, &mut actions);
                if self.ui.tool.is_draw() && !self.ui.locked {
                    self.begin_draft(screen, &mapper, &mut actions);
                }
            }
        }
        actions
    }

    fn begin_edit(&mut self, id: ShapeId, part: HitPart, screen: Point, mapper: &Mapper, actions: &mut Vec<Action>) {
        self.select(Some(id), actions);
        if self.ui.locked {
            return;
        }
        let Some(shape) = self.shapes.get(&id) else {
            return;
        };
        match part {
            HitPart::ResizeHandle(anchor) => {
                if let Some(b) = shape.geometry.as_box() {
                    debug!(%id, ?anchor, "resize start");
                    self.input = InputState::Resizing { id, anchor, orig: *b, last_valid: *b };
                    self.set_cursor(anchor.cursor(), actions);
                }
            }
            HitPart::Body => {
                debug!(%id, "move start");
                self.input = InputState::Moving {
                    id,
                    anchor: mapper.to_normalized(screen),
                    orig: shape.geometry.clone(),
                };
                self.set_cursor("move", actions);
            }
        }
    }

    fn begin_draft(&mut self, screen: Point, mapper: &Mapper, actions: &mut Vec<Action>) {
        let Some(label_id) = self.ui.active_label.clone().filter(|id| self.labels.contains(id)) else {
            debug!("no active label; draw ignored");
            return;
        };
        let start = mapper.to_normalized(screen);
        let draft = match self.ui.tool {
            Tool::Polygon => Draft::Polygon { points: vec![start], last_screen: screen },
            _ => Draft::Box { anchor: start, current: start },
        };
        debug!(tool = ?self.ui.tool, label = %label_id, "draw start");
        self.input = InputState::Drawing { draft, label_id };
        actions.push(Action::RenderNeeded);
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();

        if let InputState::Panning { last_screen } = &mut self.input {
            self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
            *last_screen = screen;
            actions.push(Action::RenderNeeded);
            return actions;
        }

        let Some(mapper) = self.mapper() else {
            return actions;
        };
        if !self.input.is_active() {
            self.refresh_hover(&mapper, screen, &mut actions);
            return actions;
        }
        let spacing = self.config.polygon_min_point_distance_px;
        let (min_w, min_h) = mapper.min_normalized_size(self.config.min_shape_px);

        match &mut self.input {
            InputState::Drawing { draft, .. } => {
                if extend_draft(draft, &mapper, screen, spacing) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Moving { id, anchor, orig } => {
                let now = mapper.to_normalized(screen);
                let moved = orig.translated_within_unit(now.x - anchor.x, now.y - anchor.y);
                actions.push(Action::ShapeUpdated { id: *id, fields: PartialShape::from_geometry(&moved) });
                actions.push(Action::RenderNeeded);
            }
            InputState::Resizing { id, anchor, orig, last_valid } => {
                let candidate = anchor.resize(orig, mapper.to_normalized(screen));
                if !Geometry::Box(candidate).is_valid(0.0, 0.0) || candidate.shrank_below(orig, min_w, min_h) {
                    debug!(%id, "resize below minimum size rejected");
                } else if candidate != *last_valid {
                    *last_valid = candidate;
                    actions.push(Action::ShapeUpdated {
                        id: *id,
                        fields: PartialShape::from_geometry(&Geometry::Box(candidate)),
                    });
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Idle | InputState::Panning { .. } => {}
        }
        actions
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let state = std::mem::take(&mut self.input);
        let mapper = self.mapper();

        match state {
            InputState::Idle => return actions,
            InputState::Drawing { mut draft, label_id } => {
                if let Some(mapper) = &mapper {
                    extend_draft(&mut draft, mapper, screen, self.config.polygon_min_point_distance_px);
                    let geometry = draft.geometry();
                    let (min_w, min_h) = mapper.min_normalized_size(self.config.min_shape_px);
                    if geometry.is_valid(min_w, min_h) {
                        let shape = Shape::new(label_id, geometry);
                        info!(id = %shape.id, label = %shape.label_id, "shape created");
                        actions.push(Action::ShapeCreated(shape));
                    } else {
                        debug!("draft below minimum size discarded");
                    }
                }
            }
            InputState::Moving { id, .. } | InputState::Resizing { id, .. } => debug!(%id, "edit end"),
            InputState::Panning { .. } => debug!(pan_x = self.camera.pan_x, pan_y = self.camera.pan_y, "pan end"),
        }
        actions.push(Action::RenderNeeded);

        let hit = mapper.as_ref().and_then(|m| self.hit_at(m, screen));
        let cursor = self.idle_cursor(hit);
        self.set_cursor(cursor, &mut actions);
        actions
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.hovered_id.take().is_some() {
            actions.push(Action::HoverChanged(None));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Zoom around the cursor, one step per event in the wheel's direction.
    pub fn on_wheel(&mut self, screen: Point, _dx: f64, dy: f64, _modifiers: Modifiers) -> Vec<Action> {
        let step = self.config.zoom_step;
        let factor = if dy < 0.0 {
            step
        } else if dy > 0.0 {
            1.0 / step
        } else {
            return Vec::new();
        };
        self.zoom_to(screen, self.camera.zoom * factor)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        match key.0.as_str() {
            "Escape" => {
                if matches!(self.input, InputState::Drawing { .. }) {
                    debug!("draft cancelled");
                }
                if !matches!(self.input, InputState::Panning { .. }) {
                    self.input = InputState::Idle;
                }
                self.select(None, &mut actions);
                actions.push(Action::RenderNeeded);
            }
            "Delete" | "Backspace" => self.delete_selected(&mut actions),
            _ if modifiers.command() && key.is_char('c') => self.copy_selected(),
            _ if modifiers.command() && key.is_char('v') => self.paste(&mut actions),
            _ if !modifiers.command() && !modifiers.alt => {
                if let Some(c) = key.as_char() {
                    self.relabel_selected(c, &mut actions);
                }
            }
            _ => {}
        }
        actions
    }

    fn delete_selected(&mut self, actions: &mut Vec<Action>) {
        if self.ui.locked || matches!(self.input, InputState::Drawing { .. }) {
            return;
        }
        let Some(id) = self.ui.selected_id else {
            return;
        };
        info!(%id, "shape deleted");
        self.input = InputState::Idle;
        actions.push(Action::ShapeDeleted { id });
        self.select(None, actions);
        actions.push(Action::RenderNeeded);
    }

    fn copy_selected(&mut self) {
        let Some(shape) = self.selected_shape() else {
            return;
        };
        debug!(id = %shape.id, "shape copied");
        self.clipboard = Some(Clipboard { geometry: shape.geometry.clone(), label_id: shape.label_id.clone() });
    }

    fn paste(&mut self, actions: &mut Vec<Action>) {
        if self.ui.locked {
            return;
        }
        let Some(clip) = &self.clipboard else {
            return;
        };
        let known = |id: &LabelId| self.labels.contains(id);
        let Some(label_id) = self
            .ui
            .active_label
            .clone()
            .filter(known)
            .or_else(|| Some(clip.label_id.clone()).filter(known))
        else {
            debug!("no known label for paste; ignored");
            return;
        };
        let shape = Shape::new(label_id, clip.geometry.offset_within_unit(self.config.paste_offset));
        info!(id = %shape.id, label = %shape.label_id, "shape pasted");
        actions.push(Action::ShapeCreated(shape));
        actions.push(Action::RenderNeeded);
    }

    fn relabel_selected(&mut self, hotkey: char, actions: &mut Vec<Action>) {
        if self.ui.locked {
            return;
        }
        let Some(label) = self.labels.by_hotkey(hotkey) else {
            return;
        };
        let Some(shape) = self.selected_shape() else {
            return;
        };
        if shape.label_id == label.id {
            return;
        }
        debug!(id = %shape.id, label = %label.id, "shape relabeled");
        actions.push(Action::ShapeUpdated { id: shape.id, fields: PartialShape::label(label.id.clone()) });
        actions.push(Action::RenderNeeded);
    }

    // --- View ---

    /// Zoom in one step around the viewport center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_to(self.viewport_center(), self.camera.zoom * self.config.zoom_step)
    }

    /// Zoom out one step around the viewport center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_to(self.viewport_center(), self.camera.zoom / self.config.zoom_step)
    }

    /// Back to zoom 1 with no pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera = Camera::default();
        vec![Action::RenderNeeded]
    }

    fn zoom_to(&mut self, screen: Point, zoom: f64) -> Vec<Action> {
        let zoom = self.config.clamp_zoom(zoom);
        if (zoom - self.camera.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.camera.zoom_at(screen, zoom);
        vec![Action::RenderNeeded]
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    // --- Helpers ---

    fn select(&mut self, id: Option<ShapeId>, actions: &mut Vec<Action>) {
        if self.ui.selected_id != id {
            self.ui.selected_id = id;
            actions.push(Action::SelectionChanged(id));
            actions.push(Action::RenderNeeded);
        }
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }

    fn refresh_hover(&mut self, mapper: &Mapper, screen: Point, actions: &mut Vec<Action>) {
        let hit = self.hit_at(mapper, screen);
        let hovered = hit.map(|h| h.shape_id);
        if self.ui.hovered_id != hovered {
            self.ui.hovered_id = hovered;
            actions.push(Action::HoverChanged(hovered));
            actions.push(Action::RenderNeeded);
        }
        self.set_cursor(self.idle_cursor(hit), actions);
    }

    fn idle_cursor(&self, hit: Option<Hit>) -> &'static str {
        match hit.map(|h| h.part) {
            Some(HitPart::ResizeHandle(anchor)) if !self.ui.locked => anchor.cursor(),
            Some(_) if !self.ui.locked => "move",
            Some(_) => "pointer",
            None if self.ui.tool == Tool::Pan => "grab",
            None if self.ui.tool.is_draw() && !self.ui.locked => "crosshair",
            None => "default",
        }
    }

    /// Hit-test labeled shapes, with the selected box's handles first.
    fn hit_at(&self, mapper: &Mapper, screen: Point) -> Option<Hit> {
        if !self.ui.annotations_visible {
            return None;
        }
        let labeled = self.shapes.labeled(&self.labels).map(|(s, _)| s);
        hit::hit(labeled, self.selected_shape(), mapper, screen, self.config.handle_radius_px)
    }

    // --- Queries ---

    /// Screen/normalized mapper for the current frame; `None` before the image loads.
    #[must_use]
    pub fn mapper(&self) -> Option<Mapper> {
        self.bounds.map(|b| Mapper::new(self.camera, b))
    }

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    /// The selected shape, if it exists and its label is known.
    #[must_use]
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.ui.selected_id.and_then(|id| self.labeled_shape(&id))
    }

    fn labeled_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id).filter(|s| self.labels.contains(&s.label_id))
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up a shape by ID.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// The in-progress draft and its label, if drawing.
    #[must_use]
    pub fn draft(&self) -> Option<(&Draft, &LabelId)> {
        match &self.input {
            InputState::Drawing { draft, label_id } => Some((draft, label_id)),
            _ => None,
        }
    }
}

/// Grow a draft toward `screen`. Returns whether it changed.
fn extend_draft(draft: &mut Draft, mapper: &Mapper, screen: Point, spacing_px: f64) -> bool {
    match draft {
        Draft::Box { current, .. } => {
            let next = mapper.to_normalized(screen);
            let changed = next != *current;
            *current = next;
            changed
        }
        Draft::Polygon { points, last_screen } => {
            if screen.distance_to(*last_screen) <= spacing_px {
                return false;
            }
            points.push(mapper.to_normalized(screen));
            *last_screen = screen;
            true
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EngineConfig) -> Self {
        Self { canvas, image: None, core: EngineCore::with_config(config) }
    }

    /// Attach a loaded image element. Call from the image's load callback.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let width = f64::from(image.natural_width());
        let height = f64::from(image.natural_height());
        self.image = Some(image);
        self.core.on_image_loaded(width, height)
    }

    /// Resize the backing store to `width_css × height_css` at `dpr` and refit the image.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * self.core.dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * self.core.dpr).round().max(0.0) as u32);
        actions
    }

    // --- Delegated data inputs ---

    pub fn set_shapes(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        self.core.set_shapes(shapes)
    }

    pub fn set_labels(&mut self, labels: Vec<Label>) -> Vec<Action> {
        self.core.set_labels(labels)
    }

    pub fn set_active_label(&mut self, label_id: Option<LabelId>) {
        self.core.set_active_label(label_id);
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn set_transform(&mut self, transform: ImageTransform) -> Vec<Action> {
        self.core.set_transform(transform)
    }

    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        self.core.set_locked(locked)
    }

    pub fn set_annotations_visible(&mut self, visible: bool) -> Vec<Action> {
        self.core.set_annotations_visible(visible)
    }

    // --- Input events ---

    pub fn dispatch(&mut self, event: InputEvent) -> Vec<Action> {
        self.core.dispatch(event)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let ops = render::scene(&self.core);
        render::paint(&ctx, &ops, self.image.as_ref(), self.core.dpr)
    }
}
