//! Error types produced while assembling, running, and reporting suites.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type SuitesResult<T> = Result<T, SuitesError>;

/// Errors that can occur while running SOAP test suites.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuitesError {
    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A properties document could not be parsed.
    #[error("invalid properties in '{source_name}' at line {line}: {message}")]
    Properties {
        /// File path or inline label of the document.
        source_name: String,
        /// One-based physical line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// `include` directives form a loop.
    #[error("cyclic include detected: {cycle}")]
    IncludeCycle {
        /// The include chain, joined with ` -> `.
        cycle: String,
    },

    /// A required configuration key was absent.
    #[error("missing required property '{key}' for {scope}")]
    MissingKey {
        /// The absent key.
        key: String,
        /// Where it was looked up.
        scope: String,
    },

    /// A configuration key held a value that could not be interpreted.
    #[error("invalid value '{value}' for property '{key}': {message}")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// Its value.
        value: String,
        /// What was expected.
        message: String,
    },

    /// The runner properties declared no suites.
    #[error("no test suites declared in '{0}'")]
    NoSuites(Utf8PathBuf),

    /// A suite was requested that the runner properties do not declare.
    #[error("suite '{0}' is not declared in soapui.test-suites")]
    UnknownSuite(String),

    /// An XML document could not be parsed or did not have the expected shape.
    #[error("XML error in '{source_name}': {message}")]
    Xml {
        /// File path or label of the document.
        source_name: String,
        /// Parser or shape error.
        message: String,
    },
}

impl SuitesError {
    /// Wraps an I/O failure with the path that triggered it.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a [`SuitesError::MissingKey`] for the given scope.
    #[must_use]
    pub fn missing_key(key: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::MissingKey {
            key: key.into(),
            scope: scope.into(),
        }
    }

    /// Builds a [`SuitesError::Xml`] for the given document.
    #[must_use]
    pub fn xml(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Xml {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
