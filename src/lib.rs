//! Timeline canvas engine for the life-exploration app.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! coordinate math, drawing, and pointer handling of the life-event timeline:
//! mapping ages to pixels, drawing the time grid and event glyphs, hit-testing
//! pointer positions, and turning raw pointer sequences into pan/zoom changes.
//! The host is responsible for supplying events and viewport state, wiring DOM
//! events to the engine, and acting on the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`event`] | Timeline event types, category colors, title truncation |
//! | [`camera`] | Viewport pan/zoom state and coordinate conversions |
//! | [`axis`] | Age ⇄ x-coordinate mapping along the time axis |
//! | [`layout`] | Glyph placement shared by rendering and hit-testing |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against event glyphs |
//! | [`render`] | Scene rendering through the [`render::Surface`] trait |
//! | [`resize`] | Backing-store sizing and `ResizeObserver` wiring |
//! | [`store`] | Injected key-value store and view persistence |
//! | [`config`] | Engine configuration |
//! | [`consts`] | Shared numeric constants (zoom limits, radii, margins, etc.) |

pub mod axis;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod event;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod resize;
pub mod store;
