//! Tunable engine parameters.
//!
//! Every field has a default from [`crate::consts`], so a host can deserialize
//! a partial JSON object and only override what it cares about.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BACKGROUND_COLOR, HANDLE_RADIUS_PX, MAX_ZOOM, MIN_SHAPE_PX, MIN_ZOOM, PASTE_OFFSET, POLYGON_MIN_POINT_DISTANCE_PX,
    ZOOM_STEP,
};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Multiplicative step for wheel and button zoom.
    pub zoom_step: f64,
    /// Minimum on-screen box edge in pixels; smaller drafts are discarded.
    pub min_shape_px: f64,
    /// Minimum on-screen spacing between recorded freehand polygon points.
    pub polygon_min_point_distance_px: f64,
    /// Resize handle grab radius in screen pixels.
    pub handle_radius_px: f64,
    /// Normalized offset applied to pasted shapes.
    pub paste_offset: f64,
    /// CSS color painted behind the image.
    pub background_color: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            min_shape_px: MIN_SHAPE_PX,
            polygon_min_point_distance_px: POLYGON_MIN_POINT_DISTANCE_PX,
            handle_radius_px: HANDLE_RADIUS_PX,
            paste_offset: PASTE_OFFSET,
            background_color: BACKGROUND_COLOR.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Clamp a zoom factor into the configured range.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if self.min_zoom <= self.max_zoom {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            zoom.clamp(self.max_zoom, self.min_zoom)
        }
    }
}
