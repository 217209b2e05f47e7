//! Sequential suite execution.
//!
//! Each suite gets a fresh overrides file holding its merged configuration.
//! The runner is launched, awaited, and its exit status recorded before the
//! next suite starts. Launch problems and non-zero exits are logged and
//! recorded; they never stop the remaining suites.

use std::io::Write;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::catalogue::{SuiteCatalogue, SuiteDescriptor};
use crate::error::{SuitesError, SuitesResult};
use crate::fs_helpers;
use crate::invocation::RunnerInvocation;

/// How a suite's runner process ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SuiteStatus {
    /// The runner exited with status 0.
    Passed,
    /// The runner exited unsuccessfully; `code` is `None` when it was killed
    /// by a signal.
    Failed {
        /// Exit code reported by the process.
        code: Option<i32>,
    },
    /// The runner could not be started.
    LaunchFailed {
        /// Why the launch failed.
        message: String,
    },
}

impl SuiteStatus {
    /// Whether the runner exited with status 0.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Result of running one suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteOutcome {
    /// Suite name.
    pub suite: String,
    /// How the runner ended.
    pub status: SuiteStatus,
    /// Wall-clock time from launch to exit.
    pub elapsed: Duration,
}

/// Outcomes of a run, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<SuiteOutcome>,
}

impl RunReport {
    /// Outcomes in execution order.
    #[must_use]
    pub fn outcomes(&self) -> &[SuiteOutcome] {
        &self.outcomes
    }

    /// Whether any suite failed to launch or exited unsuccessfully.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.status.is_success())
    }

    /// Looks up the outcome for `suite`.
    #[must_use]
    pub fn outcome(&self, suite: &str) -> Option<&SuiteOutcome> {
        self.outcomes.iter().find(|outcome| outcome.suite == suite)
    }
}

/// Runs every suite in `catalogue`, one after another.
///
/// # Errors
///
/// Returns [`SuitesError::Io`] only when an overrides file cannot be created
/// or written. Every other failure is recorded in the returned report.
pub fn execute_suites(catalogue: &SuiteCatalogue) -> SuitesResult<RunReport> {
    let log_file = &catalogue.settings().runner_log;
    let mut report = RunReport::default();
    for suite in catalogue.suites() {
        let outcome = run_suite(suite, log_file)?;
        report.outcomes.push(outcome);
    }
    Ok(report)
}

fn run_suite(suite: &SuiteDescriptor, log_file: &Utf8Path) -> SuitesResult<SuiteOutcome> {
    let overrides = write_overrides(suite)?;
    let overrides_path = utf8_path(overrides.path())?;
    info!(suite = suite.name(), "starting suite");

    let started = Instant::now();
    let status = match launch(suite, &overrides_path, log_file) {
        Ok(status) => status,
        Err(err) => SuiteStatus::LaunchFailed {
            message: err.to_string(),
        },
    };
    let elapsed = started.elapsed();

    match &status {
        SuiteStatus::Passed => {
            info!(suite = suite.name(), elapsed = ?elapsed, "suite passed");
        }
        SuiteStatus::Failed { code } => {
            warn!(suite = suite.name(), code = ?code, "runner exited unsuccessfully");
        }
        SuiteStatus::LaunchFailed { message } => {
            warn!(suite = suite.name(), error = %message, "could not launch runner");
        }
    }

    Ok(SuiteOutcome {
        suite: suite.name().to_owned(),
        status,
        elapsed,
    })
}

fn launch(
    suite: &SuiteDescriptor,
    overrides_path: &Utf8Path,
    log_file: &Utf8Path,
) -> SuitesResult<SuiteStatus> {
    let invocation = RunnerInvocation::for_suite(suite, overrides_path, log_file)?;
    fs_helpers::ensure_dir(&suite.report_dir()?)?;
    debug!(command = %invocation.display_line(), "spawning runner");

    let mut child = invocation
        .to_command()?
        .spawn()
        .map_err(|err| SuitesError::io(invocation.program(), err))?;
    let exit = child
        .wait()
        .map_err(|err| SuitesError::io(invocation.program(), err))?;
    Ok(if exit.success() {
        SuiteStatus::Passed
    } else {
        SuiteStatus::Failed { code: exit.code() }
    })
}

/// Writes the suite's merged configuration to a temporary file that is
/// removed when the returned handle drops.
fn write_overrides(suite: &SuiteDescriptor) -> SuitesResult<NamedTempFile> {
    let temp_dir = std::env::temp_dir();
    let temp_dir_utf8 = utf8_path(&temp_dir)?;
    let mut file = tempfile::Builder::new()
        .prefix(suite.name())
        .suffix(".properties")
        .tempfile()
        .map_err(|err| SuitesError::io(&temp_dir_utf8, err))?;
    let contents = format!(
        "# merged configuration for suite {}\n{}",
        suite.name(),
        suite.overrides().to_properties_string()
    );
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|err| SuitesError::io(&temp_dir_utf8, err))?;
    Ok(file)
}

fn utf8_path(path: &std::path::Path) -> SuitesResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|raw| {
        SuitesError::io(
            raw.to_string_lossy().into_owned(),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "path is not valid UTF-8"),
        )
    })
}
