//! Document model: shapes, labels, sparse updates, and the read-only shape list.
//!
//! All geometry is normalized to `[0, 1]` relative to the original image size.
//! The engine never mutates shapes in place: it reads the [`ShapeList`] the
//! host last handed it and emits [`crate::engine::Action`]s describing the
//! mutation it wants. The host's store applies them (see
//! [`Shape::apply_partial`]) and passes the new list back in.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Rect};
use crate::consts::MIN_POLYGON_POINTS;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Identifier of a label, as configured by the host.
pub type LabelId = String;

/// Slack for floating-point error when checking unit-square containment.
const UNIT_EPSILON: f64 = 1e-9;

/// An axis-aligned box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeom {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxGeom {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x, r.y, r.width, r.height)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `self`, resized from `orig`, shrank an axis below its minimum.
    /// An axis that was already under the minimum may still grow.
    #[must_use]
    pub fn shrank_below(&self, orig: &BoxGeom, min_width: f64, min_height: f64) -> bool {
        let shrank = |now: f64, before: f64, min: f64| now < min && now < before - UNIT_EPSILON;
        shrank(self.width, orig.width, min_width) || shrank(self.height, orig.height, min_height)
    }
}

/// Shape geometry, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    /// Axis-aligned bounding box.
    Box(BoxGeom),
    /// Closed polygon; at least three points once committed.
    Polygon { points: Vec<Point> },
}

impl Geometry {
    /// Axis-aligned bounding rectangle. `None` for a polygon with no points.
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Self::Box(b) => Some(b.rect()),
            Self::Polygon { points } => {
                let first = points.first()?;
                let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
                for p in &points[1..] {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
            }
        }
    }

    /// Translate by `(dx, dy)`, shortening the delta so the bounding
    /// rectangle stays inside the unit square.
    #[must_use]
    pub fn translated_within_unit(&self, dx: f64, dy: f64) -> Self {
        let Some(r) = self.bounding_rect() else {
            return self.clone();
        };
        let dx = clamp_delta(dx, r.x, r.width);
        let dy = clamp_delta(dy, r.y, r.height);
        match self {
            Self::Box(b) => Self::Box(BoxGeom::new(b.x + dx, b.y + dy, b.width, b.height)),
            Self::Polygon { points } => Self::Polygon {
                points: points.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect(),
            },
        }
    }

    /// Translate by `offset` on both axes for a pasted copy. An axis where
    /// `+offset` would leave the unit square uses `-offset` instead, so the
    /// copy never lands exactly on the original unless it spans the axis.
    #[must_use]
    pub fn offset_within_unit(&self, offset: f64) -> Self {
        let Some(r) = self.bounding_rect() else {
            return self.clone();
        };
        let toward = |start: f64, extent: f64| {
            if start + extent + offset <= 1.0 + UNIT_EPSILON { offset } else { -offset }
        };
        self.translated_within_unit(toward(r.x, r.width), toward(r.y, r.height))
    }

    /// Whether the geometry is committable: inside the unit square, a box
    /// larger than `(min_width, min_height)`, or a polygon with enough points.
    #[must_use]
    pub fn is_valid(&self, min_width: f64, min_height: f64) -> bool {
        match self {
            Self::Box(b) => {
                in_unit(b.x) && in_unit(b.y) && in_unit(b.right()) && in_unit(b.bottom())
                    && b.width > min_width
                    && b.height > min_height
            }
            Self::Polygon { points } => {
                points.len() >= MIN_POLYGON_POINTS && points.iter().all(|p| in_unit(p.x) && in_unit(p.y))
            }
        }
    }

    #[must_use]
    pub fn as_box(&self) -> Option<&BoxGeom> {
        match self {
            Self::Box(b) => Some(b),
            Self::Polygon { .. } => None,
        }
    }
}

fn in_unit(v: f64) -> bool {
    v.is_finite() && v >= -UNIT_EPSILON && v <= 1.0 + UNIT_EPSILON
}

fn clamp_delta(delta: f64, start: f64, extent: f64) -> f64 {
    let lo = -start;
    let hi = 1.0 - start - extent;
    if lo > hi { lo } else { delta.clamp(lo, hi) }
}

/// A committed annotation shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Label this shape is tagged with. May reference a label that no longer exists.
    pub label_id: LabelId,
    /// Normalized geometry.
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Shape {
    /// Create a shape with a fresh id.
    #[must_use]
    pub fn new(label_id: impl Into<LabelId>, geometry: Geometry) -> Self {
        Self { id: Uuid::new_v4(), label_id: label_id.into(), geometry }
    }

    /// Apply a sparse update. Fields that don't fit the geometry kind are
    /// ignored. Returns `false` if nothing applied.
    pub fn apply_partial(&mut self, partial: &PartialShape) -> bool {
        let mut applied = false;
        if let Some(label_id) = &partial.label_id {
            self.label_id.clone_from(label_id);
            applied = true;
        }
        match &mut self.geometry {
            Geometry::Box(b) => {
                for (slot, value) in [
                    (&mut b.x, partial.x),
                    (&mut b.y, partial.y),
                    (&mut b.width, partial.width),
                    (&mut b.height, partial.height),
                ] {
                    if let Some(v) = value {
                        *slot = v;
                        applied = true;
                    }
                }
            }
            Geometry::Polygon { points } => {
                if let Some(new_points) = &partial.points {
                    points.clone_from(new_points);
                    applied = true;
                }
            }
        }
        applied
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialShape {
    /// New box x, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New box y, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New box width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New box height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Replacement polygon points, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    /// New label, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_id: Option<LabelId>,
}

impl PartialShape {
    /// Full geometry replacement.
    #[must_use]
    pub fn from_geometry(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Box(b) => Self {
                x: Some(b.x),
                y: Some(b.y),
                width: Some(b.width),
                height: Some(b.height),
                ..Default::default()
            },
            Geometry::Polygon { points } => Self { points: Some(points.clone()), ..Default::default() },
        }
    }

    /// Label-only update.
    #[must_use]
    pub fn label(label_id: impl Into<LabelId>) -> Self {
        Self { label_id: Some(label_id.into()), ..Default::default() }
    }
}

/// An annotation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// CSS color used for outlines and fills.
    pub color: String,
    /// Single-character shortcut that assigns this label to the selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<char>,
}

/// The host's current label set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The first label whose hotkey matches `key`, ignoring ASCII case.
    #[must_use]
    pub fn by_hotkey(&self, key: char) -> Option<&Label> {
        self.labels
            .iter()
            .find(|l| l.hotkey.is_some_and(|h| h.eq_ignore_ascii_case(&key)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The shape list for the active image, in store order.
///
/// Replaced wholesale whenever the host's store changes.
#[derive(Debug, Clone, Default)]
pub struct ShapeList {
    shapes: Vec<Shape>,
}

impl ShapeList {
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Replace the whole list.
    pub fn replace(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes whose label exists, paired with that label. Orphans are skipped.
    pub fn labeled<'a>(&'a self, labels: &'a LabelSet) -> impl Iterator<Item = (&'a Shape, &'a Label)> {
        self.shapes
            .iter()
            .filter_map(move |s| labels.get(&s.label_id).map(|l| (s, l)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
