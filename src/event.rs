//! Timeline data: events, categories, and their presentation helpers.
//!
//! Events arrive from the host (usually as JSON) and are only ever read by the
//! engine. An event carries no absolute position: its horizontal placement is
//! derived from `date` through [`crate::axis`], and `local_offset` is a
//! hand-placed nudge applied on top of that.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Unique identifier for a timeline event.
pub type EventId = String;

/// Fill color used when a category's color key is not in the palette.
pub const NEUTRAL_COLOR: &str = "#9CA3AF";

/// Category colors keyed by the host's color names.
const PALETTE: &[(&str, &str)] = &[
    ("blue", "#3B82F6"),
    ("green", "#10B981"),
    ("purple", "#8B5CF6"),
    ("orange", "#F59E0B"),
    ("pink", "#EC4899"),
    ("red", "#EF4444"),
    ("teal", "#14B8A6"),
    ("indigo", "#6366F1"),
    ("yellow", "#EAB308"),
];

/// The category an event belongs to (career, education, travel, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Emoji or short glyph drawn inside the event circle.
    pub icon: String,
    /// Palette key; unknown keys fall back to [`NEUTRAL_COLOR`].
    pub color_key: String,
}

impl Category {
    /// CSS fill color for this category.
    #[must_use]
    pub fn color(&self) -> &'static str {
        color_for_key(&self.color_key)
    }
}

/// A life event on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    pub title: String,
    /// Calendar date; the time-axis position is always derived from it.
    pub date: NaiveDate,
    pub category: Category,
    /// Pixel nudge applied after time-based placement.
    #[serde(default)]
    pub local_offset: Point,
    /// 1 (worst) to 5 (best).
    pub satisfaction_rating: u8,
    /// Ids of related events. Edges are directed as stored.
    #[serde(default)]
    pub connections: BTreeSet<EventId>,
}

impl TimelineEvent {
    /// Whether this event's rating earns the glow treatment under `min_rating`.
    #[must_use]
    pub fn is_highly_rated(&self, min_rating: u8) -> bool {
        self.satisfaction_rating >= min_rating
    }
}

/// Look up the palette color for `key`, falling back to [`NEUTRAL_COLOR`].
#[must_use]
pub fn color_for_key(key: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key.trim()))
        .map_or(NEUTRAL_COLOR, |&(_, color)| color)
}

/// Truncate `title` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_owned();
    }
    let mut out: String = title.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
