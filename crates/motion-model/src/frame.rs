//! Motion frames derived from consecutive pointer samples.
//!
//! A [`Frame`] always carries the absolute position and time of one
//! observation. When it was built against a predecessor it also carries a
//! [`Motion`] describing how the pointer moved since then.
//!
//! Nothing here validates its input. A zero time delta yields infinite or
//! NaN speed through ordinary float division, and NaN coordinates flow
//! through every derived field.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::event::TimestampMs;

/// One motion observation.
///
/// Non-finite derived values serialize as `null`; absent motion fields are
/// omitted entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub t: TimestampMs,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    motion: Option<Motion>,
}

/// Kinematics relative to the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
    /// Euclidean distance moved, in pixels.
    pub displacement: f64,
    /// Radians in `[0, 2π)` from the positive x axis, y pointing down.
    pub direction: f64,
    /// Pixels per millisecond.
    pub speed: f64,
    /// Pixels per millisecond squared. NaN when the previous frame had no
    /// speed of its own.
    pub acceleration: f64,
}

impl Frame {
    /// Build a frame at `(x, y, t)`, deriving motion from `previous` when
    /// one is given.
    pub fn build(x: f64, y: f64, t: TimestampMs, previous: Option<&Frame>) -> Self {
        Self {
            x,
            y,
            t,
            motion: previous.map(|prev| Motion::between(prev, x, y, t)),
        }
    }

    /// A frame with no predecessor.
    pub fn origin(x: f64, y: f64, t: TimestampMs) -> Self {
        Self::build(x, y, t, None)
    }

    /// Derived kinematics, if this frame had a predecessor.
    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn has_motion(&self) -> bool {
        self.motion.is_some()
    }

    pub fn dx(&self) -> Option<f64> {
        self.motion.map(|m| m.dx)
    }

    pub fn dy(&self) -> Option<f64> {
        self.motion.map(|m| m.dy)
    }

    pub fn dt(&self) -> Option<f64> {
        self.motion.map(|m| m.dt)
    }

    pub fn displacement(&self) -> Option<f64> {
        self.motion.map(|m| m.displacement)
    }

    pub fn direction(&self) -> Option<f64> {
        self.motion.map(|m| m.direction)
    }

    pub fn speed(&self) -> Option<f64> {
        self.motion.map(|m| m.speed)
    }

    pub fn acceleration(&self) -> Option<f64> {
        self.motion.map(|m| m.acceleration)
    }
}

impl Motion {
    fn between(prev: &Frame, x: f64, y: f64, t: TimestampMs) -> Self {
        let dx = x - prev.x;
        let dy = y - prev.y;
        let dt = t - prev.t;
        let displacement = (dx * dx + dy * dy).sqrt();
        let speed = displacement / dt;
        let acceleration = (speed - prev.speed().unwrap_or(f64::NAN)) / dt;

        Self {
            dx,
            dy,
            dt,
            displacement,
            direction: direction(dx, dy),
            speed,
            acceleration,
        }
    }
}

/// Angle of the movement `(dx, dy)` in screen coordinates, in `[0, 2π)`.
///
/// Computed as `π + atan2(dy, -dx)`. Zero motion reads exactly `π`.
pub fn direction(dx: f64, dy: f64) -> f64 {
    // `0.0 - dx` keeps a zero delta at +0.0, where `-dx` would give -0.0
    // and flip atan2 to π.
    (PI + dy.atan2(0.0 - dx)).rem_euclid(TAU)
}

/// Tracks the last frame of one motion sequence.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    last: Option<Frame>,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame against the last one observed and make it the new last.
    pub fn observe(&mut self, x: f64, y: f64, t: TimestampMs) -> Frame {
        let frame = Frame::build(x, y, t, self.last.as_ref());
        self.last = Some(frame);
        frame
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    /// Forget the last frame; the next observation starts a new sequence.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Derive frames for a whole sequence of `(x, y, t)` samples.
pub fn build_frames<I>(samples: I) -> Vec<Frame>
where
    I: IntoIterator<Item = (f64, f64, TimestampMs)>,
{
    let mut tracker = MotionTracker::new();
    samples
        .into_iter()
        .map(|(x, y, t)| tracker.observe(x, y, t))
        .collect()
}
