//! Tracing subscriber setup for binaries.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive did not parse.
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        /// Rejected directive.
        filter: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs a formatting subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; `default_filter` applies when it is unset or
/// invalid.
///
/// # Errors
///
/// Returns [`TelemetryError`] when `default_filter` is malformed or a global
/// subscriber already exists.
pub fn init(default_filter: &str) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| TelemetryError::Filter {
            filter: default_filter.to_owned(),
            source,
        })?,
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
