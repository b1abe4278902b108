//! Hit-testing against shapes and resize handles.
//!
//! Shapes are tested in store order and the first match wins; there is no
//! z-order by recency. Polygons are tested against their bounding rectangle
//! only, not their outline.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Mapper, Point, Rect};
use crate::doc::{BoxGeom, Shape, ShapeId};

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Corners first so they win over edge midpoints on small boxes.
    pub const ALL: [ResizeAnchor; 8] = [
        Self::Nw,
        Self::Ne,
        Self::Sw,
        Self::Se,
        Self::N,
        Self::S,
        Self::E,
        Self::W,
    ];

    fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// Position of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: Rect) -> Point {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.x + rect.width
        } else {
            rect.x + rect.width * 0.5
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.y + rect.height
        } else {
            rect.y + rect.height * 0.5
        };
        Point::new(x, y)
    }

    /// Move the edges this handle controls to `pointer`, keeping the opposite
    /// edges fixed. The result may be degenerate or inverted; callers validate.
    #[must_use]
    pub fn resize(self, orig: &BoxGeom, pointer: Point) -> BoxGeom {
        let mut left = orig.x;
        let mut top = orig.y;
        let mut right = orig.right();
        let mut bottom = orig.bottom();
        if self.moves_left() {
            left = pointer.x;
        }
        if self.moves_right() {
            right = pointer.x;
        }
        if self.moves_top() {
            top = pointer.y;
        }
        if self.moves_bottom() {
            bottom = pointer.y;
        }
        BoxGeom::new(left, top, right - left, bottom - top)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

/// The first shape, in iteration order, whose screen-space bounding
/// rectangle contains `screen`.
#[must_use]
pub fn hit_test<'a>(shapes: impl IntoIterator<Item = &'a Shape>, mapper: &Mapper, screen: Point) -> Option<ShapeId> {
    shapes
        .into_iter()
        .find(|s| {
            s.geometry
                .bounding_rect()
                .is_some_and(|r| mapper.normalized_rect_to_screen(r).contains(screen))
        })
        .map(|s| s.id)
}

/// The resize handle of `shape` under `screen`, if any.
///
/// Only boxes have handles. The grab radius is `radius_px` screen pixels,
/// expressed in canvas units as `radius_px / zoom` so it stays constant on
/// screen at any zoom.
#[must_use]
pub fn resize_handle_at(shape: &Shape, mapper: &Mapper, screen: Point, radius_px: f64) -> Option<ResizeAnchor> {
    let b = shape.geometry.as_box()?;
    let rect = mapper.normalized_rect_to_canvas(b.rect());
    let pt = mapper.camera.screen_to_canvas(screen);
    let r = mapper.camera.screen_dist_to_canvas(radius_px);
    ResizeAnchor::ALL.into_iter().find(|anchor| {
        let h = anchor.position(rect);
        (pt.x - h.x).abs() <= r && (pt.y - h.y).abs() <= r
    })
}

/// Full hit test: handles of the selected shape first, then shape bodies.
#[must_use]
pub fn hit<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
    selected: Option<&Shape>,
    mapper: &Mapper,
    screen: Point,
    radius_px: f64,
) -> Option<Hit> {
    if let Some(sel) = selected {
        if let Some(anchor) = resize_handle_at(sel, mapper, screen, radius_px) {
            return Some(Hit { shape_id: sel.id, part: HitPart::ResizeHandle(anchor) });
        }
    }
    hit_test(shapes, mapper, screen).map(|shape_id| Hit { shape_id, part: HitPart::Body })
}
