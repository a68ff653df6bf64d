//! Shared numeric constants for the timeline engine.
//!
//! These are the defaults behind [`crate::config::TimelineConfig`]; code that
//! places or tests geometry should read the config, not these values directly.

// ── Time axis ───────────────────────────────────────────────────

/// Horizontal world-space pixels per year of age.
pub const PIXELS_PER_YEAR: f64 = 100.0;

/// Age that maps to world x = 0; the earliest representable age.
pub const BASELINE_AGE: f64 = 18.0;

/// How many years past the current age the grid extends.
pub const GRID_YEARS_AHEAD: u32 = 10;

/// Quarter subdivisions drawn between yearly grid lines.
pub const GRID_SUBDIVISIONS: u32 = 4;

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.3;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 3.0;

/// Multiplier applied per zoom-in step (divisor per zoom-out step).
pub const ZOOM_STEP: f64 = 1.2;

// ── Glyphs ──────────────────────────────────────────────────────

/// Glyph radius at zoom 1, in screen pixels. Also the hit-test radius.
pub const GLYPH_RADIUS_PX: f64 = 20.0;

/// Off-screen slack in pixels before grid lines and glyphs are culled.
pub const RENDER_MARGIN_PX: f64 = 50.0;

/// Titles are drawn only when zoom is strictly greater than this.
pub const LABEL_MIN_ZOOM: f64 = 0.5;

/// Titles longer than this many characters are truncated with an ellipsis.
pub const TITLE_MAX_CHARS: usize = 17;

/// Opacity for events later than the current age.
pub const FUTURE_ALPHA: f64 = 0.4;

/// Minimum satisfaction rating that earns the glow treatment.
pub const GLOW_MIN_RATING: u8 = 4;

// ── Input ───────────────────────────────────────────────────────

/// Pointer travel in screen pixels below which a press-release is a click, not a drag.
pub const CLICK_SLOP_PX: f64 = 3.0;
