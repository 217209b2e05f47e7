//! Tracing subscriber set-up.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, CliResult};

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(level: &str) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| logging_error(level, &err))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()
        .map_err(|err| logging_error(level, &err))
}

fn logging_error(level: &str, err: &impl ToString) -> CliError {
    CliError::Logging {
        filter: level.to_owned(),
        message: err.to_string(),
    }
}
