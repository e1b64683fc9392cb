//! Tracing subscriber setup.
//!
//! A bare configured level applies to the `gazerig_*` crates and everything
//! else is held at `warn`. A full directive list is used as written.
//! `RUST_LOG` replaces the configured filter when set.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directives for a configured level.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    format!("warn,gazerig={level}")
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).compact().finish())
    };
    installed.is_ok()
}

/// Default logging for tests and quick scripts.
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}
