//! MouseMotion Model
//!
//! Defines the data contracts of the motion pipeline:
//! - **Events:** raw pointer samples (page position plus timestamp)
//! - **Frames:** immutable motion observations derived from consecutive
//!   samples (deltas, displacement, direction, speed, acceleration)
//!
//! Positions are page pixels with y growing downward; times are
//! milliseconds relative to an arbitrary fixed epoch.

pub mod event;
pub mod frame;

pub use event::*;
pub use frame::*;
