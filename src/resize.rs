//! Keeps the canvas backing store in sync with its layout size.
//!
//! The browser lays the canvas out in CSS pixels; the backing store must be
//! resized to `css * dpr` device pixels or drawing blurs and pointer math
//! drifts. [`ResizeWatcher`] fires a callback whenever the element's layout
//! box changes; the host then calls [`sync_backing_store`] and pushes the
//! result into the engine.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{HtmlCanvasElement, ResizeObserver};

use crate::render::SurfaceError;

/// Layout size of the canvas and the matching backing-store size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackingSize {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl BackingSize {
    /// Derive the backing-store size for a layout box. Non-positive or
    /// non-finite dimensions become 0; an unusable `dpr` becomes 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_layout(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let css_width = sanitize(css_width);
        let css_height = sanitize(css_height);
        Self {
            css_width,
            css_height,
            pixel_width: (css_width * dpr).round().min(f64::from(u32::MAX)) as u32,
            pixel_height: (css_height * dpr).round().min(f64::from(u32::MAX)) as u32,
        }
    }

    /// Whether there is nothing to draw into.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixel_width == 0 || self.pixel_height == 0
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Read the canvas layout size and resize its backing store when it differs.
///
/// Writing `width`/`height` clears the canvas, so it only happens on change.
pub fn sync_backing_store(canvas: &HtmlCanvasElement, dpr: f64) -> BackingSize {
    let size = BackingSize::from_layout(f64::from(canvas.client_width()), f64::from(canvas.client_height()), dpr);
    if canvas.width() != size.pixel_width {
        canvas.set_width(size.pixel_width);
    }
    if canvas.height() != size.pixel_height {
        canvas.set_height(size.pixel_height);
    }
    size
}

/// Current device pixel ratio, or 1.0 outside a browser window.
#[must_use]
pub fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio().max(1.0))
}

/// Watches an element's layout box with a browser `ResizeObserver`.
///
/// The observer disconnects when the watcher is dropped.
pub struct ResizeWatcher {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl ResizeWatcher {
    /// Start observing `canvas`, invoking `on_resize` after every layout change.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the browser refuses to create the observer.
    pub fn observe(canvas: &HtmlCanvasElement, mut on_resize: impl FnMut() + 'static) -> Result<Self, SurfaceError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| on_resize(),
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(canvas);
        log::debug!("resize observer attached");
        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
