//! Logging and tracing initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a global tracing subscriber built from `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(filter_for(&config.level));

    if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .try_init()
            .is_ok()
    }
}

/// Initialize logging with defaults (useful for quick scripts).
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}

/// Route logs through the test harness so they show up only for failing tests.
pub fn init_test_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for("debug"))
        .with_test_writer()
        .try_init()
        .ok();
}
