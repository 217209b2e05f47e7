//! Library backing the `soap-suite-runner` binary.
//!
//! Exposes the CLI definition, settings layering, and the top-level
//! [`run`] so integration tests can drive the same code as `main`.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
pub mod settings;

use std::io::{self, Write};

use soap_suites::Pipeline;
use tracing::info;

use crate::cli::Args;
use crate::error::{CliError, CliResult};
use crate::settings::{CliSettings, load_settings};

/// Loads settings, initialises logging, and runs (or plans) the suites.
///
/// # Errors
///
/// Returns a [`CliError`] when settings, logging, or the pipeline fail, or
/// when suites failed and `fail_on_suite_failure` is set.
pub fn run(args: &Args) -> CliResult<()> {
    let settings = load_settings(args)?;
    logging::init_logging(&settings.log_level)?;
    execute(&settings)
}

/// Runs the pipeline described by already-loaded `settings`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(settings: &CliSettings) -> CliResult<()> {
    let pipeline = Pipeline::new(settings.properties.clone())
        .suites(settings.suites.clone())
        .report_dir(settings.report_dir.clone())
        .skip_execution(settings.skip_run);

    let mut stdout = io::stdout().lock();
    if settings.dry_run {
        let plan = pipeline.plan()?;
        output::write_plan(&mut stdout, &plan)?;
        return Ok(());
    }

    let summary = pipeline.run()?;
    output::write_summary(&mut stdout, &summary)?;
    stdout.flush()?;

    if settings.fail_on_suite_failure && summary.has_failures() {
        info!("failing because at least one suite failed");
        return Err(CliError::SuiteFailures {
            report: summary.html_path,
        });
    }
    Ok(())
}
