use tracing_subscriber::{EnvFilter, prelude::*};

use crate::config::LogFormat;
use crate::errors::{WebTailError, WebTailResult};

const DEFAULT_FILTER: &str = "info";

/// Initialize logging based on environment configuration
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error).
///   Falls back to `info` when unset so every poll is logged.
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized
/// - `Err(WebTailError::LoggingInitialization)` if a subscriber is already set
pub fn init_logging(format: LogFormat) -> WebTailResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| WebTailError::LoggingInitialization(e.to_string()))
}
