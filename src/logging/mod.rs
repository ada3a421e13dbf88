//! Structured logging setup
//!
//! Installs the tracing subscriber used throughout the application.
//! Events go to stderr so prompt output on stdout stays clean, and
//! verbosity comes from `RUST_LOG` with an `info` default.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Logging setup error types
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    FilterError(String),

    #[error("Failed to initialize subscriber: {0}")]
    InitError(String),
}

/// Initialize the tracing subscriber for structured logging
///
/// Respects `RUST_LOG` when set and falls back to `info` otherwise.
///
/// # Errors
///
/// Returns an error if the filter directive cannot be parsed or a
/// global subscriber is already registered for this process.
///
/// # Examples
///
/// ```no_run
/// use aquamark::logging::init_subscriber;
///
/// init_subscriber().expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber() -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| LoggingError::FilterError(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::InitError(e.to_string()))?;

    Ok(())
}
