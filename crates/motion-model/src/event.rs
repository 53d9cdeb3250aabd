//! Raw pointer samples.

use serde::{Deserialize, Serialize};

/// Milliseconds relative to an arbitrary fixed epoch.
pub type TimestampMs = f64;

/// A single pointer movement as delivered by an event source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Horizontal page coordinate in pixels.
    pub x: f64,

    /// Vertical page coordinate in pixels, growing downward.
    pub y: f64,

    /// Event timestamp. Some sources cannot stamp their events; the
    /// consumer then falls back to its own clock.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<TimestampMs>,
}

impl PointerEvent {
    /// Create a stamped pointer event.
    pub fn new(x: f64, y: f64, timestamp_ms: TimestampMs) -> Self {
        Self {
            x,
            y,
            timestamp_ms: Some(timestamp_ms),
        }
    }

    /// Create an event without a timestamp.
    pub fn unstamped(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            timestamp_ms: None,
        }
    }

    /// The event's timestamp, or `fallback()` if it carries none.
    pub fn timestamp_or_else(&self, fallback: impl FnOnce() -> TimestampMs) -> TimestampMs {
        self.timestamp_ms.unwrap_or_else(fallback)
    }

    /// Position as an `(x, y)` pair.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
