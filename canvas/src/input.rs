//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the user's intent at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute geometry from the
//! gesture's anchor and to emit the final mutation on release.
//! `InputEvent` is the single envelope the host feeds into
//! [`crate::engine::EngineCore::dispatch`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::doc::{BoxGeom, Geometry, LabelId, ShapeId};
use crate::hit::ResizeAnchor;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag out a bounding box.
    Box,
    /// Trace a freehand polygon.
    Polygon,
    /// Drag to pan the view.
    Pan,
}

impl Tool {
    /// Whether this tool draws new shapes.
    #[must_use]
    pub fn is_draw(self) -> bool {
        matches!(self, Self::Box | Self::Polygon)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"c"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a single character, when it is one.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.0.chars();
        let c = chars.next()?;
        if chars.next().is_some() { None } else { Some(c) }
    }

    /// Case-insensitive match against a single-character key name.
    #[must_use]
    pub fn is_char(&self, expected: char) -> bool {
        self.as_char().is_some_and(|c| c.eq_ignore_ascii_case(&expected))
    }
}

/// One raw input event, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The pointer left the canvas element.
    PointerLeave,
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Label assigned to newly drawn or pasted shapes.
    pub active_label: Option<LabelId>,
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    /// The id of the shape under the pointer, if any.
    pub hovered_id: Option<ShapeId>,
    /// When set, shapes can be selected but not created or edited.
    pub locked: bool,
    /// When cleared, shapes are neither painted nor hit-tested.
    pub annotations_visible: bool,
    /// Last CSS cursor reported to the host.
    pub cursor: &'static str,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            active_label: None,
            selected_id: None,
            hovered_id: None,
            locked: false,
            annotations_visible: true,
            cursor: "default",
        }
    }
}

/// An uncommitted shape being drawn. Points are normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Box {
        /// Normalized corner where the drag started.
        anchor: Point,
        /// Normalized pointer position at the latest event.
        current: Point,
    },
    Polygon {
        /// Recorded normalized vertices, in drawing order.
        points: Vec<Point>,
        /// Screen position of the last recorded vertex, for point spacing.
        last_screen: Point,
    },
}

impl Draft {
    /// Geometry the draft would commit as.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        match self {
            Self::Box { anchor, current } => Geometry::Box(BoxGeom::from_rect(Rect::from_corners(*anchor, *current))),
            Self::Polygon { points, .. } => Geometry::Polygon { points: points.clone() },
        }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute geometry and
/// emit actions until pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is drawing a new shape.
    Drawing {
        /// The in-progress shape.
        draft: Draft,
        /// Label captured at pointer-down.
        label_id: LabelId,
    },
    /// The user is moving an existing shape.
    Moving {
        /// Id of the shape being moved.
        id: ShapeId,
        /// Normalized pointer position at pointer-down.
        anchor: Point,
        /// Shape geometry at pointer-down; every move is computed from it.
        orig: Geometry,
    },
    /// The user is resizing a box by dragging one of its eight handles.
    Resizing {
        /// Id of the box being resized.
        id: ShapeId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Box geometry at pointer-down.
        orig: BoxGeom,
        /// Last size that passed validation; kept when a resize is rejected.
        last_valid: BoxGeom,
    },
    /// The user is panning the view.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Engine-local copy buffer. Never touches the system clipboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    pub geometry: Geometry,
    /// Label of the copied shape; paste falls back to it when the active
    /// label is unset or unknown.
    pub label_id: LabelId,
}
