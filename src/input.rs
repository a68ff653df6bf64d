//! Input model: mouse buttons, keys, and the pointer gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. There are exactly two states: idle, or panning with a drag
//! anchor. Transitions are explicit functions so the engine never encodes
//! gesture state in loose flags.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{Point, Viewport};
use crate::config::TimelineConfig;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"+"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// A view command triggered by a toolbar button or keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    ZoomIn,
    ZoomOut,
    /// Center the current age, zero vertical pan, zoom 1.
    Reset,
}

impl Key {
    /// The view command bound to this key, if any.
    #[must_use]
    pub fn command(&self) -> Option<ViewCommand> {
        match self.0.as_str() {
            "+" | "=" => Some(ViewCommand::ZoomIn),
            "-" | "_" => Some(ViewCommand::ZoomOut),
            "0" => Some(ViewCommand::Reset),
            _ => None,
        }
    }
}

/// Gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the timeline.
    Panning {
        /// Pointer position minus pan at pointer-down. Pan is recomputed from it
        /// on every move, so accumulated rounding never drifts.
        anchor: Point,
        /// Screen position of the pointer-down, used to tell a click from a drag.
        pressed_at: Point,
    },
}

impl InputState {
    /// Enter panning for a pointer-down at `pointer` over empty canvas.
    #[must_use]
    pub fn begin_pan(pointer: Point, viewport: &Viewport) -> Self {
        Self::Panning {
            anchor: Point::new(pointer.x - viewport.pan_x, pointer.y - viewport.pan_y),
            pressed_at: pointer,
        }
    }

    /// The viewport after moving the pointer to `pointer`, or `None` when not panning.
    #[must_use]
    pub fn pan_to(&self, pointer: Point, viewport: &Viewport) -> Option<Viewport> {
        match self {
            Self::Idle => None,
            Self::Panning { anchor, .. } => {
                Some(Viewport { pan_x: pointer.x - anchor.x, pan_y: pointer.y - anchor.y, ..*viewport })
            }
        }
    }

    /// Whether releasing at `pointer` ends a click rather than a drag.
    #[must_use]
    pub fn is_click_release(&self, pointer: Point, slop: f64) -> bool {
        match self {
            Self::Idle => false,
            Self::Panning { pressed_at, .. } => pressed_at.distance_to(pointer) <= slop,
        }
    }

    /// Pointer released or left the surface.
    #[must_use]
    pub fn end(self) -> Self {
        Self::Idle
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// One zoom step around the current pan origin, clamped to the configured bounds.
#[must_use]
pub fn zoom_step(viewport: &Viewport, direction: ZoomDirection, config: &TimelineConfig) -> Viewport {
    let zoom = match direction {
        ZoomDirection::In => viewport.zoom * config.zoom_step,
        ZoomDirection::Out => viewport.zoom / config.zoom_step,
    };
    Viewport { zoom: config.clamp_zoom(zoom), ..*viewport }
}
