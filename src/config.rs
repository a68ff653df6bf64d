//! Engine configuration.
//!
//! Every geometric rule the renderer and hit-tester share lives here so the
//! two can never disagree about scale. Hosts may override any field from JSON;
//! missing fields take the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BASELINE_AGE, CLICK_SLOP_PX, FUTURE_ALPHA, GLOW_MIN_RATING, GLYPH_RADIUS_PX, GRID_YEARS_AHEAD, LABEL_MIN_ZOOM,
    PIXELS_PER_YEAR, RENDER_MARGIN_PX, TITLE_MAX_CHARS, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};

/// Errors produced while loading or validating a [`TimelineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse timeline config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the engine cannot work with.
    #[error("invalid timeline config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Tunable geometry and styling rules for the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineConfig {
    /// World-space pixels per year of age.
    pub pixels_per_year: f64,
    /// Age mapped to world x = 0.
    pub baseline_age: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Zoom multiplier per zoom-in step.
    pub zoom_step: f64,
    /// Glyph radius at zoom 1; scaled by zoom for drawing and hit-testing.
    pub glyph_radius: f64,
    /// Culling slack around the visible area, in screen pixels.
    pub render_margin: f64,
    pub label_min_zoom: f64,
    pub title_max_chars: usize,
    pub future_alpha: f64,
    pub glow_min_rating: u8,
    pub grid_years_ahead: u32,
    /// Largest pointer travel, in screen pixels, that still counts as a click.
    pub click_slop: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            pixels_per_year: PIXELS_PER_YEAR,
            baseline_age: BASELINE_AGE,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            glyph_radius: GLYPH_RADIUS_PX,
            render_margin: RENDER_MARGIN_PX,
            label_min_zoom: LABEL_MIN_ZOOM,
            title_max_chars: TITLE_MAX_CHARS,
            future_alpha: FUTURE_ALPHA,
            glow_min_rating: GLOW_MIN_RATING,
            grid_years_ahead: GRID_YEARS_AHEAD,
            click_slop: CLICK_SLOP_PX,
        }
    }
}

impl TimelineConfig {
    /// Parse a config from JSON, filling absent fields with defaults, then validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a field fails [`Self::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a usable geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_year.is_finite() && self.pixels_per_year > 0.0) {
            return Err(invalid("pixelsPerYear", "must be a positive number"));
        }
        if !self.baseline_age.is_finite() {
            return Err(invalid("baselineAge", "must be finite"));
        }
        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
            return Err(invalid("zoomMin", "must be a positive number"));
        }
        if !(self.zoom_max.is_finite() && self.zoom_max >= self.zoom_min) {
            return Err(invalid("zoomMax", "must be at least zoomMin"));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(invalid("zoomStep", "must be greater than 1"));
        }
        if !(self.glyph_radius.is_finite() && self.glyph_radius > 0.0) {
            return Err(invalid("glyphRadius", "must be a positive number"));
        }
        if !(self.render_margin.is_finite() && self.render_margin >= 0.0) {
            return Err(invalid("renderMargin", "must not be negative"));
        }
        if !(self.click_slop.is_finite() && self.click_slop >= 0.0) {
            return Err(invalid("clickSlop", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.future_alpha) {
            return Err(invalid("futureAlpha", "must be within 0..=1"));
        }
        Ok(())
    }

    /// Clamp `zoom` into `[zoom_min, zoom_max]`; non-finite input falls back to 1.0 first.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        // max/min rather than clamp: an unvalidated config with inverted bounds must not panic.
        zoom.max(self.zoom_min).min(self.zoom_max)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
