//! Error types shared across MouseMotion crates.
//!
//! Frame derivation and throttling never fail; these errors only surface
//! from the ambient layers (configuration files and polled input backends).

use std::path::PathBuf;

/// Top-level error type for MouseMotion operations.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input backend error: {message}")]
    Backend { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MotionError.
pub type MotionResult<T> = Result<T, MotionError>;

impl MotionError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend {
            message: msg.into(),
        }
    }
}
