//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MotionError, MotionResult};

/// Default minimum gap between handler invocations (ms).
pub const DEFAULT_THROTTLE_WAIT_MS: f64 = 100.0;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults applied when a motion handler is registered.
    pub motion: MotionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Options for a single motion binding.
///
/// Resolved once at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Whether handler invocations are rate-limited.
    pub should_throttle: bool,

    /// Minimum gap (ms) after an accepted invocation before the next one
    /// is admitted. Calls landing exactly on the boundary are dropped.
    pub throttle_wait_ms: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mousemotion_stream=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            should_throttle: true,
            throttle_wait_ms: DEFAULT_THROTTLE_WAIT_MS,
        }
    }
}

impl MotionConfig {
    /// Unthrottled binding: every event reaches the handler.
    pub fn unthrottled() -> Self {
        Self {
            should_throttle: false,
            ..Self::default()
        }
    }

    /// Throttled binding with the given wait.
    pub fn throttled(wait_ms: f64) -> Self {
        Self {
            should_throttle: true,
            throttle_wait_ms: wait_ms,
        }
    }
}

/// `shouldThrottle` on its own keeps the default wait.
impl From<bool> for MotionConfig {
    fn from(should_throttle: bool) -> Self {
        Self {
            should_throttle,
            ..Self::default()
        }
    }
}

/// `(shouldThrottle, throttleWaitMs)`.
impl From<(bool, f64)> for MotionConfig {
    fn from((should_throttle, throttle_wait_ms): (bool, f64)) -> Self {
        Self {
            should_throttle,
            throttle_wait_ms,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> MotionResult<Self> {
        if !path.exists() {
            return Err(MotionError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.motion.throttle_wait_ms.is_nan() {
            return Err(MotionError::config("throttle_wait_ms must be a number"));
        }
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> MotionResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> MotionResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("mousemotion").join("config.json")
}
