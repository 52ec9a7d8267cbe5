//! Shared numeric constants for the drawcore crate.

// ── Camera ──────────────────────────────────────────────────────

/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 8.0;

/// Multiplicative step applied by `zoom_in` / `zoom_out`.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Wheel delta to zoom factor coefficient (`k` in `zoom * (1 + k * -dy)`).
pub const DEFAULT_WHEEL_ZOOM_SPEED: f64 = 0.01;

// ── Hit-testing ─────────────────────────────────────────────────

/// Extra world-space slop added to a draw stroke's size when hit-testing open paths.
pub const DRAW_HIT_MARGIN: f64 = 2.0;

/// Tolerance for treating a point as lying on a polygon edge.
pub const GEOM_EPSILON: f64 = 1e-9;

// ── Shapes ──────────────────────────────────────────────────────

/// Smallest width/height a resize may produce, in world units.
pub const MIN_SHAPE_SIZE: f64 = 1.0;

/// Width of the fallback box for fixed-size text.
pub const TEXT_FIXED_WIDTH: f64 = 200.0;

/// Fixed-size text box height as a multiple of font size.
pub const TEXT_FIXED_HEIGHT_FACTOR: f64 = 1.5;

/// Heuristic glyph advance as a multiple of font size.
pub const TEXT_GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// Heuristic line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Font size bounds enforced by the text style helpers.
pub const TEXT_MIN_FONT_SIZE: f64 = 8.0;
pub const TEXT_MAX_FONT_SIZE: f64 = 200.0;

/// Default tolerance for freehand path simplification.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 2.0;

/// Default blend factor for freehand path smoothing.
pub const DEFAULT_SMOOTHING: f64 = 0.5;

/// Fill opacity used for closed freehand paths.
pub const CLOSED_PATH_FILL_OPACITY: f64 = 0.1;

// ── Pages ───────────────────────────────────────────────────────

/// Name given to the page created at editor construction.
pub const DEFAULT_PAGE_NAME: &str = "Page 1";
