//! Host configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default, so an empty environment yields a working setup.
//! Engine tuning starts from `EngineConfig::default()`, is optionally replaced
//! by a JSON file (`ANNOTATE_ENGINE_CONFIG`), and then individual
//! `ANNOTATE_*` variables override single fields. Unparseable numeric values
//! fall back to the default rather than failing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use canvas::config::EngineConfig;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
pub const DEFAULT_DPR: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read engine config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid engine config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("viewport must be positive and finite, got {width}x{height} @ {dpr}")]
    InvalidViewport { width: f64, height: f64, dpr: f64 },
    #[error("zoom range is empty: min {min} > max {max}")]
    InvalidZoomRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    pub engine: EngineConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            dpr: DEFAULT_DPR,
            engine: EngineConfig::default(),
        }
    }
}

impl HostConfig {
    /// Build host config from environment variables.
    ///
    /// Optional:
    /// - `ANNOTATE_VIEWPORT_WIDTH` / `ANNOTATE_VIEWPORT_HEIGHT`: CSS pixels, default 1280x800
    /// - `ANNOTATE_DPR`: device pixel ratio, default 1
    /// - `ANNOTATE_ENGINE_CONFIG`: path to a JSON `EngineConfig` (partial objects allowed)
    /// - `ANNOTATE_MIN_ZOOM`, `ANNOTATE_MAX_ZOOM`, `ANNOTATE_ZOOM_STEP`
    /// - `ANNOTATE_MIN_SHAPE_PX`, `ANNOTATE_POLYGON_POINT_SPACING_PX`
    /// - `ANNOTATE_HANDLE_RADIUS_PX`, `ANNOTATE_PASTE_OFFSET`
    ///
    /// # Errors
    ///
    /// Returns an error if the engine config file cannot be read or parsed,
    /// or the resulting values are out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut engine = match std::env::var("ANNOTATE_ENGINE_CONFIG") {
            Ok(path) => load_engine_config(PathBuf::from(path))?,
            Err(_) => EngineConfig::default(),
        };
        engine.min_zoom = env_parse("ANNOTATE_MIN_ZOOM", engine.min_zoom);
        engine.max_zoom = env_parse("ANNOTATE_MAX_ZOOM", engine.max_zoom);
        engine.zoom_step = env_parse("ANNOTATE_ZOOM_STEP", engine.zoom_step);
        engine.min_shape_px = env_parse("ANNOTATE_MIN_SHAPE_PX", engine.min_shape_px);
        engine.polygon_min_point_distance_px =
            env_parse("ANNOTATE_POLYGON_POINT_SPACING_PX", engine.polygon_min_point_distance_px);
        engine.handle_radius_px = env_parse("ANNOTATE_HANDLE_RADIUS_PX", engine.handle_radius_px);
        engine.paste_offset = env_parse("ANNOTATE_PASTE_OFFSET", engine.paste_offset);

        let config = Self {
            viewport_width: env_parse("ANNOTATE_VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH),
            viewport_height: env_parse("ANNOTATE_VIEWPORT_HEIGHT", DEFAULT_VIEWPORT_HEIGHT),
            dpr: env_parse("ANNOTATE_DPR", DEFAULT_DPR),
            engine,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes the engine cannot fit an image into and empty zoom ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height, dpr) = (self.viewport_width, self.viewport_height, self.dpr);
        if [width, height, dpr].iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::InvalidViewport { width, height, dpr });
        }
        if self.engine.min_zoom > self.engine.max_zoom {
            return Err(ConfigError::InvalidZoomRange { min: self.engine.min_zoom, max: self.engine.max_zoom });
        }
        Ok(())
    }
}

fn load_engine_config(path: PathBuf) -> Result<EngineConfig, ConfigError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
