//! Rendering: draws the full timeline scene onto a [`Surface`].
//!
//! This module is the only place that issues drawing calls. It receives a
//! read-only [`Scene`] and produces pixels; it does not mutate any application
//! state. Every frame is a full clear-and-redraw in a fixed layer order, and
//! later layers paint over earlier ones:
//!
//! 1. clear
//! 2. time grid (yearly lines, quarter lines, age labels)
//! 3. current-age marker
//! 4. connection lines
//! 5. event glyphs and titles
//!
//! [`CanvasSurface`] adapts a browser `CanvasRenderingContext2d`; tests use a
//! recording surface to assert on the draw calls themselves.

#[cfg(test)]
#[path = "render_test.rs"]
pub(crate) mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::axis::TimeAxis;
use crate::camera::Point;
use crate::config::TimelineConfig;
use crate::consts::GRID_SUBDIVISIONS;
use crate::event::{self, TimelineEvent};
use crate::layout::{self, Placement, Scene};

const GRID_YEAR_COLOR: &str = "#E5E7EB";
const GRID_QUARTER_COLOR: &str = "#F3F4F6";
const GRID_LABEL_COLOR: &str = "#6B7280";
const CURRENT_AGE_COLOR: &str = "#EF4444";
const CONNECTION_COLOR: &str = "#94A3B8";
const GLYPH_BORDER_COLOR: &str = "#FFFFFF";
const GLYPH_GLOW_COLOR: &str = "#FBBF24";
const TITLE_COLOR: &str = "#1F2937";

/// Grid lines start below this band, which holds the age labels.
const LABEL_BAND_PX: f64 = 30.0;
const LABEL_BASELINE_PX: f64 = 20.0;
const LABEL_FONT_PX: f64 = 12.0;
const ICON_FONT_PX: f64 = 16.0;
const TITLE_FONT_PX: f64 = 12.0;
const TITLE_GAP_PX: f64 = 14.0;
const CONNECTION_DASH_PX: f64 = 5.0;
const GLOW_BLUR_PX: f64 = 15.0;

/// Errors raised by a drawing backend.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// A `Canvas2D` call rejected its arguments or the context is unusable.
    #[error("canvas call failed: {0}")]
    Canvas(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(format!("{value:?}"))
    }
}

/// Stroke parameters for a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Dash and gap lengths in pixels; `None` draws a solid line.
    pub dash: Option<f64>,
}

/// Fill and border parameters for an event glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle<'a> {
    pub fill: &'a str,
    pub border: &'a str,
    pub border_width: f64,
    pub alpha: f64,
    /// Shadow blur radius in pixels; `None` disables the glow.
    pub glow: Option<f64>,
}

/// Text placement and style. Text is centered horizontally on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub color: &'a str,
    pub size_px: f64,
    pub alpha: f64,
}

/// A 2D drawing backend, in screen (CSS pixel) coordinates.
pub trait Surface {
    /// Erase everything within `width` × `height`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError>;

    /// Stroke a straight segment.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>) -> Result<(), SurfaceError>;

    /// Fill and outline a circle.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn circle(&mut self, center: Point, radius: f64, style: &GlyphStyle<'_>) -> Result<(), SurfaceError>;

    /// Draw a single line of text centered on `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), SurfaceError>;
}

/// Counts of what a frame drew, for tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub year_lines: usize,
    pub quarter_lines: usize,
    pub connections: usize,
    pub glyphs: usize,
    pub culled: usize,
}

/// Draw the full scene.
///
/// A viewport without area draws nothing, not even the clear.
///
/// # Errors
///
/// Returns the first [`SurfaceError`] raised by the surface.
pub fn draw(
    surface: &mut dyn Surface,
    scene: &Scene<'_>,
    axis: &TimeAxis,
    config: &TimelineConfig,
) -> Result<FrameStats, SurfaceError> {
    let mut stats = FrameStats::default();
    let viewport = &scene.viewport;
    if !viewport.has_area() {
        return Ok(stats);
    }

    // Layer 1: clear.
    surface.clear(viewport.width, viewport.height)?;

    // Layer 2: time grid.
    draw_grid(surface, scene, axis, config, &mut stats)?;

    // Layer 3: current-age marker.
    let marker_x = axis.age_to_x(scene.current_age, viewport);
    surface.line(
        Point::new(marker_x, 0.0),
        Point::new(marker_x, viewport.height),
        &Stroke { color: CURRENT_AGE_COLOR, width: 3.0, dash: None },
    )?;

    // Layer 4: connections.
    for source in scene.events {
        for target_id in &source.connections {
            let Some(target) = scene.event(target_id) else {
                continue;
            };
            let from = layout::place(source, scene, axis, config).center;
            let to = layout::place(target, scene, axis, config).center;
            surface.line(
                from,
                to,
                &Stroke { color: CONNECTION_COLOR, width: 2.0, dash: Some(CONNECTION_DASH_PX) },
            )?;
            stats.connections += 1;
        }
    }

    // Layer 5: glyphs, in list order.
    for event in scene.events {
        let placement = layout::place(event, scene, axis, config);
        if !layout::is_visible(&placement, viewport, config) {
            stats.culled += 1;
            continue;
        }
        draw_glyph(surface, event, &placement, scene, config)?;
        stats.glyphs += 1;
    }

    Ok(stats)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn draw_grid(
    surface: &mut dyn Surface,
    scene: &Scene<'_>,
    axis: &TimeAxis,
    config: &TimelineConfig,
    stats: &mut FrameStats,
) -> Result<(), SurfaceError> {
    let viewport = &scene.viewport;
    let margin = config.render_margin;
    // Only ages whose lines can land inside the margin band are visited.
    let first = (config.baseline_age.ceil() as i64).max(axis.x_to_age(-margin, viewport).floor() as i64);
    let last = (scene.current_age.floor() as i64)
        .saturating_add(i64::from(config.grid_years_ahead))
        .min(axis.x_to_age(viewport.width + margin, viewport).ceil() as i64);
    let top = LABEL_BAND_PX;
    let bottom = viewport.height;

    let year_stroke = Stroke { color: GRID_YEAR_COLOR, width: 1.0, dash: None };
    let quarter_stroke = Stroke { color: GRID_QUARTER_COLOR, width: 0.5, dash: None };
    let label_style = TextStyle { color: GRID_LABEL_COLOR, size_px: LABEL_FONT_PX * viewport.zoom, alpha: 1.0 };

    for age in first..=last {
        let x = axis.age_to_x(age as f64, viewport);
        if viewport.contains_x(x, margin) {
            surface.line(Point::new(x, top), Point::new(x, bottom), &year_stroke)?;
            surface.text(&age.to_string(), Point::new(x, LABEL_BASELINE_PX), &label_style)?;
            stats.year_lines += 1;
        }

        if age == last {
            break;
        }
        for quarter in 1..GRID_SUBDIVISIONS {
            let qx = axis.age_to_x(age as f64 + f64::from(quarter) / f64::from(GRID_SUBDIVISIONS), viewport);
            if viewport.contains_x(qx, margin) {
                surface.line(Point::new(qx, top), Point::new(qx, bottom), &quarter_stroke)?;
                stats.quarter_lines += 1;
            }
        }
    }
    Ok(())
}

fn draw_glyph(
    surface: &mut dyn Surface,
    event: &TimelineEvent,
    placement: &Placement,
    scene: &Scene<'_>,
    config: &TimelineConfig,
) -> Result<(), SurfaceError> {
    let zoom = scene.viewport.zoom;
    let future = placement.is_future(scene.current_age);
    let glows = !future && event.is_highly_rated(config.glow_min_rating);
    let alpha = if future { config.future_alpha } else { 1.0 };

    let style = GlyphStyle {
        fill: event.category.color(),
        border: if glows { GLYPH_GLOW_COLOR } else { GLYPH_BORDER_COLOR },
        border_width: if glows { 4.0 } else { 2.0 },
        alpha,
        glow: glows.then_some(GLOW_BLUR_PX * zoom),
    };
    surface.circle(placement.center, placement.radius, &style)?;

    if !event.category.icon.is_empty() {
        surface.text(
            &event.category.icon,
            placement.center,
            &TextStyle { color: GLYPH_BORDER_COLOR, size_px: ICON_FONT_PX * zoom, alpha },
        )?;
    }

    if zoom > config.label_min_zoom {
        let title = event::truncate_title(&event.title, config.title_max_chars);
        let at = Point::new(placement.center.x, placement.center.y + placement.radius + TITLE_GAP_PX * zoom);
        surface.text(&title, at, &TextStyle { color: TITLE_COLOR, size_px: TITLE_FONT_PX * zoom, alpha })?;
    }
    Ok(())
}

// =============================================================
// Browser backend
// =============================================================

/// [`Surface`] over a browser 2D context.
///
/// Coordinates are CSS pixels; `dpr` scales them onto the backing store.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasSurface {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d, dpr: f64) -> Self {
        Self { ctx, dpr }
    }

    fn set_dash(&self, dash: Option<f64>) -> Result<(), SurfaceError> {
        let pattern = js_sys::Array::new();
        if let Some(len) = dash {
            pattern.push(&len.into());
            pattern.push(&len.into());
        }
        self.ctx.set_line_dash(&pattern)?;
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke<'_>) -> Result<(), SurfaceError> {
        self.ctx.save();
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.set_dash(stroke.dash)?;
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        self.ctx.restore();
        Ok(())
    }

    fn circle(&mut self, center: Point, radius: f64, style: &GlyphStyle<'_>) -> Result<(), SurfaceError> {
        self.ctx.save();
        self.ctx.set_global_alpha(style.alpha);
        if let Some(blur) = style.glow {
            self.ctx.set_shadow_color(style.border);
            self.ctx.set_shadow_blur(blur);
        }
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.ctx.set_fill_style_str(style.fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(style.border);
        self.ctx.set_line_width(style.border_width);
        self.ctx.stroke();
        self.ctx.restore();
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), SurfaceError> {
        self.ctx.save();
        self.ctx.set_global_alpha(style.alpha);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_font(&format!("{:.0}px sans-serif", style.size_px.max(1.0)));
        self.ctx.fill_text(text, at.x, at.y)?;
        self.ctx.restore();
        Ok(())
    }
}
