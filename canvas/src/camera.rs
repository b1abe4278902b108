//! Coordinate spaces and the mapping between them.
//!
//! Three spaces are in play:
//!
//! - **screen**: CSS pixels relative to the canvas element, as delivered by
//!   pointer events.
//! - **canvas**: screen with the camera's pan and zoom removed. The fitted
//!   image occupies [`ImageBounds`] in this space.
//! - **normalized**: fractions of the original image's width and height, in
//!   `[0, 1]`. All shape geometry is stored here.
//!
//! [`Mapper`] combines a [`Camera`] with the current [`ImageBounds`] and is the
//! only place these conversions happen.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in screen, canvas, or normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in the same space.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build the rectangle spanned by two corners, in any drag direction.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Whether `pt` lies inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Camera state for pan/zoom over the canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels and applied before the zoom scale:
/// `screen = canvas * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Translate by a raw screen delta. Pan lives in screen pixels, so the
    /// delta is not scaled by zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Change zoom while keeping the canvas point under `screen` fixed.
    ///
    /// `new_zoom` must already be clamped by the caller.
    pub fn zoom_at(&mut self, screen: Point, new_zoom: f64) {
        let anchor = self.screen_to_canvas(screen);
        self.zoom = new_zoom;
        self.pan_x = screen.x - anchor.x * new_zoom;
        self.pan_y = screen.y - anchor.y * new_zoom;
    }
}

/// The letterboxed rectangle, in canvas space, that the fitted image occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub offset_x: f64,
    pub offset_y: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl ImageBounds {
    /// Fit an image into the viewport preserving aspect ratio, centered on
    /// the free axis.
    ///
    /// Returns `None` when either size is empty or not finite.
    #[must_use]
    pub fn fit(image_width: f64, image_height: f64, viewport_width: f64, viewport_height: f64) -> Option<Self> {
        let sizes = [image_width, image_height, viewport_width, viewport_height];
        if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return None;
        }
        let scale = (viewport_width / image_width).min(viewport_height / image_height);
        let display_width = image_width * scale;
        let display_height = image_height * scale;
        Some(Self {
            offset_x: (viewport_width - display_width) * 0.5,
            offset_y: (viewport_height - display_height) * 0.5,
            display_width,
            display_height,
        })
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.display_width, self.display_height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Clamp a canvas point onto the image rectangle.
    #[must_use]
    pub fn clamp(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x.clamp(self.offset_x, self.offset_x + self.display_width),
            y: canvas.y.clamp(self.offset_y, self.offset_y + self.display_height),
        }
    }
}

/// Converts between screen, canvas, and normalized space for one frame of
/// camera and image-bounds state.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    pub camera: Camera,
    pub bounds: ImageBounds,
}

impl Mapper {
    #[must_use]
    pub fn new(camera: Camera, bounds: ImageBounds) -> Self {
        Self { camera, bounds }
    }

    /// Map a screen point to normalized image coordinates, clamped to the image.
    #[must_use]
    pub fn to_normalized(&self, screen: Point) -> Point {
        self.canvas_to_normalized(self.camera.screen_to_canvas(screen))
    }

    /// Map a normalized point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, normalized: Point) -> Point {
        self.camera.canvas_to_screen(self.normalized_to_canvas(normalized))
    }

    /// Map a canvas point to normalized coordinates, clamping to the image first.
    #[must_use]
    pub fn canvas_to_normalized(&self, canvas: Point) -> Point {
        let c = self.bounds.clamp(canvas);
        Point {
            x: (c.x - self.bounds.offset_x) / self.bounds.display_width,
            y: (c.y - self.bounds.offset_y) / self.bounds.display_height,
        }
    }

    /// Map a normalized point into canvas space (no clamping).
    #[must_use]
    pub fn normalized_to_canvas(&self, normalized: Point) -> Point {
        Point {
            x: self.bounds.offset_x + normalized.x * self.bounds.display_width,
            y: self.bounds.offset_y + normalized.y * self.bounds.display_height,
        }
    }

    /// Map a normalized rectangle into canvas space.
    #[must_use]
    pub fn normalized_rect_to_canvas(&self, rect: Rect) -> Rect {
        let origin = self.normalized_to_canvas(Point::new(rect.x, rect.y));
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.bounds.display_width,
            rect.height * self.bounds.display_height,
        )
    }

    /// Map a normalized rectangle into screen space.
    #[must_use]
    pub fn normalized_rect_to_screen(&self, rect: Rect) -> Rect {
        let a = self.to_screen(Point::new(rect.x, rect.y));
        let b = self.to_screen(Point::new(rect.x + rect.width, rect.y + rect.height));
        Rect::from_corners(a, b)
    }

    /// The smallest normalized `(width, height)` corresponding to `px` screen
    /// pixels at the current display scale.
    #[must_use]
    pub fn min_normalized_size(&self, px: f64) -> (f64, f64) {
        (
            px / (self.bounds.display_width * self.camera.zoom),
            px / (self.bounds.display_height * self.camera.zoom),
        )
    }
}
