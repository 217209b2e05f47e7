//! Error types for `soap-suite-runner`.

use camino::Utf8PathBuf;
use soap_suites::SuitesError;
use thiserror::Error;

/// Convenience alias for results returned by the CLI.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the `soap-suite-runner` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The layered settings could not be extracted.
    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// An explicitly requested settings file does not exist.
    #[error("settings file not found: {0}")]
    MissingConfig(Utf8PathBuf),

    /// The log filter could not be parsed or the subscriber installed.
    #[error("invalid log filter '{filter}': {message}")]
    Logging {
        /// The rejected filter.
        filter: String,
        /// Why it was rejected.
        message: String,
    },

    /// Assembling, running, or reporting suites failed.
    #[error(transparent)]
    Suites(#[from] SuitesError),

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Suites failed and `--fail-on-suite-failure` was set.
    #[error("suites failed; see {report}")]
    SuiteFailures {
        /// The HTML report describing the failures.
        report: Utf8PathBuf,
    },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}
