//! Glyph placement shared by the renderer and the hit-tester.
//!
//! Both consumers must agree exactly on where a glyph is, or clicks miss what
//! the user sees. They therefore call [`place`] rather than duplicating the
//! formula.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::axis::{TimeAxis, event_age};
use crate::camera::{Point, Viewport};
use crate::config::TimelineConfig;
use crate::event::TimelineEvent;

/// Read-only inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub events: &'a [TimelineEvent],
    pub viewport: Viewport,
    /// The user's current age; anchors the marker and the past/future split.
    /// Glyph positions never depend on it.
    pub current_age: f64,
    /// Calendar year of "now"; each event's age is this minus the event year.
    pub current_year: i32,
    /// Accepted from the host; no effect on drawing.
    pub comparison_mode: bool,
}

impl<'a> Scene<'a> {
    /// Look up an event by id.
    #[must_use]
    pub fn event(&self, id: &str) -> Option<&'a TimelineEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Where an event's glyph sits on screen this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Glyph center in screen pixels.
    pub center: Point,
    /// Screen radius (config radius scaled by zoom).
    pub radius: f64,
    /// The user's age at the event.
    pub age: f64,
}

impl Placement {
    /// Whether the event is later than the current age.
    #[must_use]
    pub fn is_future(&self, current_age: f64) -> bool {
        self.age > current_age
    }
}

/// Compute the screen placement of `event`.
///
/// The glyph's world point is the event age on the time axis and the local y
/// offset; the local x offset is a screen-space nudge added after the
/// viewport transform, so it does not scale with zoom.
#[must_use]
pub fn place(event: &TimelineEvent, scene: &Scene<'_>, axis: &TimeAxis, config: &TimelineConfig) -> Placement {
    let viewport = &scene.viewport;
    let age = event_age(event.date, scene.current_year);
    let anchor = viewport.world_to_screen(Point::new(axis.age_to_world_x(age), event.local_offset.y));
    let center = Point::new(anchor.x + event.local_offset.x, anchor.y);
    Placement { center, radius: config.glyph_radius * viewport.zoom, age }
}

/// Whether any part of a placed glyph's bounding box reaches the area
/// widened by the render margin.
#[must_use]
pub fn is_visible(placement: &Placement, viewport: &Viewport, config: &TimelineConfig) -> bool {
    viewport.contains(placement.center, config.render_margin + placement.radius)
}
