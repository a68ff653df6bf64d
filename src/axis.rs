//! Time axis: maps ages to horizontal positions and back.
//!
//! World x is `(age - baseline_age) * pixels_per_year`; screen x applies the
//! viewport's zoom and horizontal pan. Event positions are never stored; they
//! are always derived from the event date through this mapping, so changing
//! the viewport or the current age cannot desynchronize an event from its date.

#[cfg(test)]
#[path = "axis_test.rs"]
mod axis_test;

use chrono::{Datelike, NaiveDate};

use crate::camera::Viewport;
use crate::config::TimelineConfig;

/// The age ⇄ x mapping shared by the renderer and the hit-tester.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub baseline_age: f64,
    pub pixels_per_year: f64,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self::from_config(&TimelineConfig::default())
    }
}

impl TimeAxis {
    #[must_use]
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self { baseline_age: config.baseline_age, pixels_per_year: config.pixels_per_year }
    }

    /// World-space x for `age`, before pan/zoom.
    #[must_use]
    pub fn age_to_world_x(&self, age: f64) -> f64 {
        (age - self.baseline_age) * self.pixels_per_year
    }

    /// Inverse of [`Self::age_to_world_x`].
    #[must_use]
    pub fn world_x_to_age(&self, world_x: f64) -> f64 {
        world_x / self.pixels_per_year + self.baseline_age
    }

    /// Screen-space x for `age` under `viewport`.
    #[must_use]
    pub fn age_to_x(&self, age: f64, viewport: &Viewport) -> f64 {
        self.age_to_world_x(age) * viewport.zoom + viewport.pan_x
    }

    /// Inverse of [`Self::age_to_x`].
    #[must_use]
    pub fn x_to_age(&self, x: f64, viewport: &Viewport) -> f64 {
        self.world_x_to_age((x - viewport.pan_x) / viewport.zoom)
    }
}

/// Age coordinate of an event dated `date`: whole calendar years from the
/// event's year to `current_year`.
///
/// Only the year takes part; month and day never shift a glyph. The result is
/// compared against the current age for the past/future split.
#[must_use]
pub fn event_age(date: NaiveDate, current_year: i32) -> f64 {
    f64::from(current_year - date.year())
}
