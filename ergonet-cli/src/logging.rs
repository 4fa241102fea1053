//! Logging initialisation for the ergonet CLI.
//!
//! Installs a global `tracing` subscriber with optional JSON formatting
//! and bridges the `log` facade so crates using either API emit
//! structured events.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "ERGONET_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `ERGONET_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// Failed to bridge the `log` facade.
    #[error("failed to install log bridge: {source}")]
    BridgeFailed {
        /// Error raised by the `log` facade.
        #[source]
        source: tracing_log::log::SetLoggerError,
    },
}

/// Install global structured logging if it has not already been
/// configured.
///
/// The log format defaults to human-readable output, but can be switched
/// to JSON by setting `ERGONET_LOG_FORMAT=json`. Diagnostics go to
/// `stderr` so output files and summaries on `stdout` stay parseable.
/// The log level is controlled via `RUST_LOG`.
///
/// # Errors
/// Returns [`LoggingError`] if the environment variable contains invalid
/// Unicode, the requested format is unsupported, or the subscriber
/// cannot be installed.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }
    let format = match env::var(LOG_FORMAT_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => "human".to_owned(),
        Err(source) => {
            return Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            });
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    let install = match format.to_ascii_lowercase().as_str() {
        "human" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .boxed(),
            )
            .try_init(),
        "json" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .boxed(),
            )
            .try_init(),
        _ => {
            return Err(LoggingError::UnsupportedFormat { provided: format });
        }
    };
    install.map_err(|source| LoggingError::InstallFailed { source })?;
    LogTracer::init().map_err(|source| LoggingError::BridgeFailed { source })?;
    INITIALISED.set(()).ok();
    Ok(())
}
