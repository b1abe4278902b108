//! Base-image transform pipeline: rotation, flips, and color filters.
//!
//! These parameters only ever affect the image raster. Annotation overlays stay
//! axis-aligned in normalized space, so at a non-zero rotation or with a flip
//! the overlays no longer line up with image content. Joint transformation of
//! image and overlays is not performed.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{FILTER_IDENTITY_PCT, FILTER_MAX_PCT};

/// Image view parameters set by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    /// Clockwise rotation in degrees. Any value; normalized mod 360.
    pub rotation_deg: f64,
    /// Mirror around the vertical axis.
    pub flip_h: bool,
    /// Mirror around the horizontal axis.
    pub flip_v: bool,
    /// Brightness percentage, `0..=200`, 100 = identity.
    pub brightness: f64,
    /// Contrast percentage, `0..=200`, 100 = identity.
    pub contrast: f64,
    /// Saturation percentage, `0..=200`, 100 = identity.
    pub saturation: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            flip_h: false,
            flip_v: false,
            brightness: FILTER_IDENTITY_PCT,
            contrast: FILTER_IDENTITY_PCT,
            saturation: FILTER_IDENTITY_PCT,
        }
    }
}

/// The affine steps to apply around the image center before drawing the
/// raster at `(-w/2, -h/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTransform {
    /// Pivot in canvas space (the image bounds center).
    pub center: Point,
    /// Rotation in radians, already reduced to `[0, 2π)`.
    pub rotation_rad: f64,
    /// `-1.0` when flipped horizontally, else `1.0`.
    pub scale_x: f64,
    /// `-1.0` when flipped vertically, else `1.0`.
    pub scale_y: f64,
}

impl ImageTransform {
    /// Rotation reduced to `[0, 360)`.
    #[must_use]
    pub fn normalized_rotation(&self) -> f64 {
        let r = self.rotation_deg.rem_euclid(360.0);
        if r.is_finite() { r } else { 0.0 }
    }

    /// Copy with the filter percentages clamped into `0..=200`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            brightness: clamp_pct(self.brightness),
            contrast: clamp_pct(self.contrast),
            saturation: clamp_pct(self.saturation),
            ..self
        }
    }

    fn filters_are_identity(&self) -> bool {
        let c = self.clamped();
        [c.brightness, c.contrast, c.saturation]
            .iter()
            .all(|v| (*v - FILTER_IDENTITY_PCT).abs() < f64::EPSILON)
    }

    /// CSS filter string for the 2D canvas `filter` property.
    #[must_use]
    pub fn css_filter(&self) -> String {
        if self.filters_are_identity() {
            return "none".to_owned();
        }
        let c = self.clamped();
        format!(
            "brightness({}%) contrast({}%) saturate({}%)",
            c.brightness, c.contrast, c.saturation
        )
    }

    /// Compose the render transform around `center`.
    #[must_use]
    pub fn render_transform(&self, center: Point) -> RenderTransform {
        RenderTransform {
            center,
            rotation_rad: self.normalized_rotation().to_radians(),
            scale_x: if self.flip_h { -1.0 } else { 1.0 },
            scale_y: if self.flip_v { -1.0 } else { 1.0 },
        }
    }
}

fn clamp_pct(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, FILTER_MAX_PCT) } else { FILTER_IDENTITY_PCT }
}
