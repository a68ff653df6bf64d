#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::axis::TimeAxis;
use crate::camera::Point;
use crate::config::TimelineConfig;
use crate::event::TimelineEvent;
use crate::layout::{self, Scene};

/// Result of resolving a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit<'a> {
    /// The pointer is on this event's glyph.
    Event(&'a TimelineEvent),
    /// Nothing was hit; carries the pointer position in world space.
    Canvas(Point),
}

/// Find the first event (in list order) whose glyph contains `screen_pt`.
///
/// A point exactly on the rim counts as inside. Glyphs the renderer culls are
/// never hit.
#[must_use]
pub fn hit_test<'a>(
    screen_pt: Point,
    scene: &Scene<'a>,
    axis: &TimeAxis,
    config: &TimelineConfig,
) -> Option<&'a TimelineEvent> {
    scene.events.iter().find(|event| {
        let placement = layout::place(event, scene, axis, config);
        layout::is_visible(&placement, &scene.viewport, config) && screen_pt.distance_to(placement.center) <= placement.radius
    })
}

/// Resolve `screen_pt` into an event hit or an empty-canvas world position.
#[must_use]
pub fn resolve<'a>(screen_pt: Point, scene: &Scene<'a>, axis: &TimeAxis, config: &TimelineConfig) -> Hit<'a> {
    match hit_test(screen_pt, scene, axis, config) {
        Some(event) => Hit::Event(event),
        None => Hit::Canvas(scene.viewport.screen_to_world(screen_pt)),
    }
}
