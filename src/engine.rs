use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::axis::TimeAxis;
use crate::camera::{Point, Viewport};
use crate::config::TimelineConfig;
use crate::event::{EventId, TimelineEvent};
use crate::hit::{self, Hit};
use crate::input::{self, Button, InputState, Key, ViewCommand, ZoomDirection};
use crate::layout::Scene;
use crate::render::{self, CanvasSurface, FrameStats, Surface};
use crate::resize;
use crate::store::{self, KeyValueStore};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";
const CURSOR_POINTER: &str = "pointer";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user clicked an event glyph.
    EventClicked(EventId),
    /// The user clicked empty canvas; `world` is the pointer in world space.
    CanvasClicked { world: Point },
    /// Pan or zoom changed; the host should commit this as its viewport state.
    ViewportChanged(Viewport),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
///
/// The host owns the viewport and the event list. `viewport` and `events` here
/// are the last values the host pushed in, held only so handlers have
/// something to compute against. Any handler that moves the view returns
/// [`Action::ViewportChanged`]; the host must commit that viewport as its own
/// state and keep calling [`EngineCore::set_viewport`] and
/// [`EngineCore::set_events`] whenever its copy changes, or the two drift.
pub struct EngineCore {
    pub events: Vec<TimelineEvent>,
    pub viewport: Viewport,
    pub input: InputState,
    pub config: TimelineConfig,
    pub axis: TimeAxis,
    pub current_age: f64,
    pub current_year: i32,
    pub comparison_mode: bool,
    cursor: &'static str,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: TimelineConfig, current_age: f64, current_year: i32) -> Self {
        Self {
            events: Vec::new(),
            viewport: Viewport::default(),
            input: InputState::default(),
            axis: TimeAxis::from_config(&config),
            config,
            current_age,
            current_year,
            comparison_mode: false,
            cursor: CURSOR_GRAB,
        }
    }

    // --- Data inputs ---

    /// Replace the event list. List order is hit-test priority.
    pub fn set_events(&mut self, events: Vec<TimelineEvent>) -> Vec<Action> {
        self.events = events;
        vec![Action::RenderNeeded]
    }

    pub fn set_current_age(&mut self, current_age: f64) -> Vec<Action> {
        self.current_age = current_age;
        vec![Action::RenderNeeded]
    }

    pub fn set_current_year(&mut self, current_year: i32) -> Vec<Action> {
        self.current_year = current_year;
        vec![Action::RenderNeeded]
    }

    pub fn set_comparison_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.comparison_mode = enabled;
        vec![Action::RenderNeeded]
    }

    /// Adopt the host's viewport as the source of truth. Zoom is clamped.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = Viewport { zoom: self.config.clamp_zoom(viewport.zoom), ..viewport };
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// Read-only view of the current frame inputs.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            events: &self.events,
            viewport: self.viewport,
            current_age: self.current_age,
            current_year: self.current_year,
            comparison_mode: self.comparison_mode,
        }
    }

    /// Resolve a screen point against the current scene.
    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> Hit<'_> {
        hit::resolve(screen_pt, &self.scene(), &self.axis, &self.config)
    }

    /// Look up an event by id.
    #[must_use]
    pub fn event(&self, id: &str) -> Option<&TimelineEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let clicked = match self.hit(screen_pt) {
            Hit::Event(event) => Some(event.id.clone()),
            Hit::Canvas(_) => None,
        };
        if let Some(id) = clicked {
            log::debug!("event clicked: {id}");
            self.input = InputState::Idle;
            return vec![Action::EventClicked(id)];
        }
        self.input = InputState::begin_pan(screen_pt, &self.viewport);
        log::debug!("pan started at ({:.1}, {:.1})", screen_pt.x, screen_pt.y);
        self.cursor_action(CURSOR_GRABBING).into_iter().collect()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if let Some(viewport) = self.input.pan_to(screen_pt, &self.viewport) {
            self.viewport = viewport;
            return vec![Action::ViewportChanged(viewport), Action::RenderNeeded];
        }
        let cursor = match self.hit(screen_pt) {
            Hit::Event(_) => CURSOR_POINTER,
            Hit::Canvas(_) => CURSOR_GRAB,
        };
        self.cursor_action(cursor).into_iter().collect()
    }

    /// End a pan. A release that hasn't moved past the click slop is an empty-canvas click.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_panning() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.input.is_click_release(screen_pt, self.config.click_slop) {
            let world = self.viewport.screen_to_world(screen_pt);
            log::debug!("canvas clicked at world ({:.1}, {:.1})", world.x, world.y);
            actions.push(Action::CanvasClicked { world });
        }
        self.input = self.input.end();
        log::debug!("pan ended");
        actions.extend(self.cursor_action(CURSOR_GRAB));
        actions
    }

    /// Pointer left the surface: abandon any pan without emitting a click.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if !self.input.is_panning() {
            return Vec::new();
        }
        self.input = self.input.end();
        log::debug!("pan cancelled by pointer leave");
        self.cursor_action(CURSOR_GRAB).into_iter().collect()
    }

    // --- View commands ---

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        key.command().map_or_else(Vec::new, |command| self.apply_command(command))
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.apply_command(ViewCommand::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.apply_command(ViewCommand::ZoomOut)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.apply_command(ViewCommand::Reset)
    }

    /// Apply a zoom or reset. Zoom steps keep the pan origin fixed.
    pub fn apply_command(&mut self, command: ViewCommand) -> Vec<Action> {
        let next = match command {
            ViewCommand::ZoomIn => input::zoom_step(&self.viewport, ZoomDirection::In, &self.config),
            ViewCommand::ZoomOut => input::zoom_step(&self.viewport, ZoomDirection::Out, &self.config),
            ViewCommand::Reset => self.centered_view(),
        };
        log::debug!("{command:?}: zoom {:.3} -> {:.3}", self.viewport.zoom, next.zoom);
        self.viewport = next;
        vec![Action::ViewportChanged(next), Action::RenderNeeded]
    }

    /// Zoom 1, no vertical pan, current age at the horizontal center.
    fn centered_view(&self) -> Viewport {
        let zoom = self.config.clamp_zoom(1.0);
        let age_x = self.axis.age_to_world_x(self.current_age) * zoom;
        Viewport { pan_x: self.viewport.width * 0.5 - age_x, pan_y: 0.0, zoom, ..self.viewport }
    }

    // --- Resize ---

    /// Adopt a new surface size. Pan and zoom are left untouched.
    #[allow(clippy::float_cmp)]
    pub fn on_resize(&mut self, width: f64, height: f64) -> Vec<Action> {
        if width == self.viewport.width && height == self.viewport.height {
            return Vec::new();
        }
        log::debug!("resize {}x{} -> {width}x{height}", self.viewport.width, self.viewport.height);
        self.viewport.width = width;
        self.viewport.height = height;
        vec![Action::ViewportChanged(self.viewport), Action::RenderNeeded]
    }

    // --- Render ---

    /// Draw the current scene. Failures are logged, never propagated.
    pub fn render_to(&self, surface: &mut dyn Surface) -> Option<FrameStats> {
        match render::draw(surface, &self.scene(), &self.axis, &self.config) {
            Ok(stats) => {
                log::trace!("frame: {stats:?}");
                Some(stats)
            }
            Err(err) => {
                log::warn!("render failed: {err}");
                None
            }
        }
    }

    // --- Persistence ---

    /// Save pan and zoom to `store`. Failures are logged.
    pub fn persist_view(&self, store: &mut dyn KeyValueStore) {
        if let Err(err) = store::save_view(store, &self.viewport) {
            log::warn!("failed to persist view: {err}");
        }
    }

    /// Restore pan and zoom from `store`, if a valid view was saved.
    pub fn restore_view(&mut self, store: &dyn KeyValueStore) -> Vec<Action> {
        let Some(saved) = store::load_view(store) else {
            return Vec::new();
        };
        self.viewport = saved.apply(&self.viewport, &self.config);
        vec![Action::ViewportChanged(self.viewport), Action::RenderNeeded]
    }

    fn cursor_action(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor(cursor.to_owned()))
    }
}

/// The full timeline engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Every handler re-renders when its actions include [`Action::RenderNeeded`]
/// and then returns the actions so the host can react to clicks and view changes.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: TimelineConfig, current_age: f64, current_year: i32) -> Self {
        Self { canvas, core: EngineCore::new(config, current_age, current_year) }
    }

    // --- Delegated data inputs ---

    pub fn set_events(&mut self, events: Vec<TimelineEvent>) -> Vec<Action> {
        let actions = self.core.set_events(events);
        self.after(actions)
    }

    pub fn set_current_age(&mut self, current_age: f64) -> Vec<Action> {
        let actions = self.core.set_current_age(current_age);
        self.after(actions)
    }

    pub fn set_current_year(&mut self, current_year: i32) -> Vec<Action> {
        let actions = self.core.set_current_year(current_year);
        self.after(actions)
    }

    pub fn set_comparison_mode(&mut self, enabled: bool) -> Vec<Action> {
        let actions = self.core.set_comparison_mode(enabled);
        self.after(actions)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        let actions = self.core.set_viewport(viewport);
        self.after(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen_pt, button);
        self.after(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.after(actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen_pt, button);
        self.after(actions)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_leave();
        self.after(actions)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        let actions = self.core.on_key_down(key);
        self.after(actions)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_in();
        self.after(actions)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_out();
        self.after(actions)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        let actions = self.core.reset_view();
        self.after(actions)
    }

    // --- Viewport ---

    /// Resize the backing store to the canvas layout size and adopt it.
    ///
    /// Call on mount and from a [`resize::ResizeWatcher`] callback.
    pub fn sync_size(&mut self) -> Vec<Action> {
        let size = resize::sync_backing_store(&self.canvas, resize::device_pixel_ratio());
        let actions = self.core.on_resize(size.css_width, size.css_height);
        self.after(actions)
    }

    // --- Render ---

    /// Draw the current state to the canvas. A missing 2D context draws nothing.
    pub fn render(&self) {
        let Some(ctx) = self.context() else {
            log::warn!("canvas has no 2d context; skipping render");
            return;
        };
        let mut surface = CanvasSurface::new(ctx, resize::device_pixel_ratio());
        self.core.render_to(&mut surface);
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        match self.canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => Some(ctx),
                Err(_) => None,
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("get_context failed: {err:?}");
                None
            }
        }
    }

    fn after(&self, actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::RenderNeeded) {
            self.render();
        }
        actions
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport
    }

    #[must_use]
    pub fn event(&self, id: &str) -> Option<&TimelineEvent> {
        self.core.event(id)
    }
}
