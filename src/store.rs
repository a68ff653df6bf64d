//! Injected key-value storage and viewport persistence.
//!
//! The engine never reaches for ambient browser storage. Hosts pass a
//! [`KeyValueStore`] explicitly: [`LocalStorage`] in the browser,
//! [`MemoryStore`] in tests or non-browser hosts.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::camera::Viewport;
use crate::config::TimelineConfig;

/// Storage key for the persisted view.
pub const VIEW_KEY: &str = "timeline:view";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store rejected the write (quota, privacy mode, ...).
    #[error("storage write failed: {0}")]
    Write(String),
    /// The value could not be encoded.
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage.
pub trait KeyValueStore {
    /// Read the value for `key`; `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backing store rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Browser `localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's `localStorage`, if the browser exposes one.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read failed for {key}: {err:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|err: JsValue| StoreError::Write(format!("{err:?}")))
    }
}

/// The persisted part of a viewport. Size is layout-driven and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl SavedView {
    #[must_use]
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self { pan_x: viewport.pan_x, pan_y: viewport.pan_y, zoom: viewport.zoom }
    }

    /// Apply onto `viewport`, clamping zoom and ignoring non-finite pan.
    #[must_use]
    pub fn apply(&self, viewport: &Viewport, config: &TimelineConfig) -> Viewport {
        Viewport {
            pan_x: if self.pan_x.is_finite() { self.pan_x } else { viewport.pan_x },
            pan_y: if self.pan_y.is_finite() { self.pan_y } else { viewport.pan_y },
            zoom: config.clamp_zoom(self.zoom),
            ..*viewport
        }
    }
}

/// Serialize the view under [`VIEW_KEY`].
///
/// # Errors
///
/// Returns [`StoreError`] if encoding or the store write fails.
pub fn save_view(store: &mut dyn KeyValueStore, viewport: &Viewport) -> Result<(), StoreError> {
    let raw = serde_json::to_string(&SavedView::from_viewport(viewport))?;
    store.set(VIEW_KEY, &raw)
}

/// Read the view stored under [`VIEW_KEY`]; malformed data reads as absent.
#[must_use]
pub fn load_view(store: &dyn KeyValueStore) -> Option<SavedView> {
    let raw = store.get(VIEW_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(view) => Some(view),
        Err(err) => {
            log::warn!("ignoring malformed saved view: {err}");
            None
        }
    }
}
