#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Viewport state for pan/zoom over the timeline.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
/// `width` / `height` are the drawing surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, width: 0.0, height: 0.0 }
    }
}

impl Viewport {
    /// Undo pan, then zoom. Used to report empty-canvas clicks in world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan_x) / self.zoom, (screen.y - self.pan_y) / self.zoom)
    }

    /// Scale by zoom, then pan. Glyph anchors go through here.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.zoom + self.pan_x, world.y * self.zoom + self.pan_y)
    }

    /// Whether the viewport has a drawable area.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whether screen x lies within the visible width widened by `margin` on both sides.
    #[must_use]
    pub fn contains_x(&self, x: f64, margin: f64) -> bool {
        x >= -margin && x <= self.width + margin
    }

    /// Whether a screen point lies within the visible area widened by `margin` on all sides.
    #[must_use]
    pub fn contains(&self, screen: Point, margin: f64) -> bool {
        self.contains_x(screen.x, margin) && screen.y >= -margin && screen.y <= self.height + margin
    }
}
