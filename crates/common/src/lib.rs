//! MouseMotion Common Utilities
//!
//! Shared infrastructure for all MouseMotion crates:
//! - Error types and result aliases
//! - Clocks used for throttling and timestamp fallback
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
