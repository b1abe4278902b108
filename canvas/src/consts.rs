//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative zoom step for one wheel notch or zoom button press.
pub const ZOOM_STEP: f64 = 1.1;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum on-screen box edge, in pixels, for a drawn box to be committed.
pub const MIN_SHAPE_PX: f64 = 5.0;

/// Minimum on-screen distance between consecutive freehand polygon points.
pub const POLYGON_MIN_POINT_DISTANCE_PX: f64 = 5.0;

/// Minimum vertex count for a committed polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Normalized offset applied on both axes when pasting a copied shape.
pub const PASTE_OFFSET: f64 = 0.05;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

// ── Filters ─────────────────────────────────────────────────────

/// Identity value for brightness, contrast, and saturation percentages.
pub const FILTER_IDENTITY_PCT: f64 = 100.0;

/// Upper bound for brightness, contrast, and saturation percentages.
pub const FILTER_MAX_PCT: f64 = 200.0;

// ── Paint ───────────────────────────────────────────────────────

/// Canvas fill behind the letterboxed image.
pub const BACKGROUND_COLOR: &str = "#1F1F1F";

/// Draft outline dash segment length in screen pixels.
pub const DRAFT_DASH_PX: f64 = 6.0;
