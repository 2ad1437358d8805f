//! Logger module
//!
//! Thin layer over `tracing`:
//! - subscriber setup (compact or JSON, to stderr)
//! - access log lines on the `access` target
//! - error and warning helpers used across the server

mod format;

pub use format::AccessLogEntry;

use crate::config::{AccessLogFormat, LoggingConfig};
use crate::error::StartupError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Logs go to stderr so
/// stdout only carries the startup line.
pub fn init(config: &LoggingConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| StartupError::Logging(e.to_string()))
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_connection_error(err: &hyper::Error) {
    // Clients dropping keep-alive connections mid-request are routine
    if err.is_incomplete_message() || err.is_canceled() {
        tracing::debug!(error = %err, "connection closed early");
    } else {
        tracing::warn!(error = %err, "failed to serve connection");
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    tracing::info!(
        target: "access",
        status = entry.status,
        request_time_us = entry.request_time_us,
        "{}",
        entry.format(format)
    );
}
