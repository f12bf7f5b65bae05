// crates/status-relay-cli/src/logging.rs
// ============================================================================
// Module: Logging Setup
// Description: Tracing subscriber initialization for the relay binary.
// Purpose: Route structured logs to stderr with a configurable filter.
// Dependencies: tracing-subscriber, thiserror
// ============================================================================

//! ## Overview
//! `RUST_LOG` takes precedence over the configured filter. Logs go to stderr
//! so stdout stays free for the log publisher.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Logging setup failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("log subscriber init failed: {0}")]
    Init(String),
}

/// Picks the effective filter directive.
#[must_use]
pub fn filter_directive(env_value: Option<&str>, configured: &str) -> String {
    env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(configured)
        .to_string()
}

/// Parses a filter directive.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] when the directive is malformed.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|err| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        reason: err.to_string(),
    })
}

/// Installs the global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`LoggingError`] when the directive is invalid or a subscriber is
/// already installed.
pub fn init_tracing(directive: &str) -> Result<(), LoggingError> {
    let filter = parse_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))
}
