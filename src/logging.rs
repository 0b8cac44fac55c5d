//! Tracing bootstrap for hosts embedding the checker.
//!
//! The checker emits `debug` events when the rule is inactive for a node and
//! `trace` events for every finding. Hosts that do not install their own
//! subscriber can call [`init_logging`].

use std::io;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format for log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (default).
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging options, usually part of a host's configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Build the filter: `RUST_LOG` wins, otherwise `level`.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()))
}

/// Install a global subscriber writing to stderr.
///
/// Returns `false` if a global subscriber was already installed, so calling
/// this more than once (e.g. from several tests) is harmless.
pub fn init_logging(config: LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.level))
        .with_target(false)
        .with_writer(io::stderr);

    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.is_ok()
}
