//! Command-line interface definitions for `soap-suite-runner`.

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;

/// Parsed CLI arguments for `soap-suite-runner`.
///
/// Every value is optional so that only flags the user actually passed
/// override the configuration file and environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "soap-suite-runner")]
#[command(about = "Run SoapUI test suites and publish an aggregated HTML report")]
#[command(version)]
pub struct Args {
    /// Runner properties file declaring the suites [default: runner.properties].
    #[arg(long, value_name = "path")]
    pub properties: Option<Utf8PathBuf>,
    /// Directory for result files and reports, overriding `soapui.report.dir`.
    #[arg(long, value_name = "path")]
    pub report_dir: Option<Utf8PathBuf>,
    /// Run only this suite (repeat for several).
    #[arg(long = "suite", value_name = "name")]
    pub suites: Vec<String>,
    /// TOML settings file [default: soap-suite-runner.toml when present].
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Print the runner command for each suite and exit.
    #[arg(long)]
    pub dry_run: bool,
    /// Aggregate existing result files without launching the runner.
    #[arg(long)]
    pub skip_run: bool,
    /// Exit unsuccessfully when any suite fails.
    #[arg(long)]
    pub fail_on_suite_failure: bool,
    /// Tracing filter used when `RUST_LOG` is unset [default: info].
    #[arg(long, value_name = "filter")]
    pub log_level: Option<String>,
}

/// The subset of [`Args`] the user supplied, shaped like the settings file.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ProvidedArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_dir: Option<&'a Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suites: Option<&'a [String]>,
    #[serde(skip_serializing_if = "is_false")]
    dry_run: bool,
    #[serde(skip_serializing_if = "is_false")]
    skip_run: bool,
    #[serde(skip_serializing_if = "is_false")]
    fail_on_suite_failure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<&'a str>,
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's skip_serializing_if passes fields by reference"
)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl Args {
    pub(crate) fn provided(&self) -> ProvidedArgs<'_> {
        ProvidedArgs {
            properties: self.properties.as_ref(),
            report_dir: self.report_dir.as_ref(),
            suites: (!self.suites.is_empty()).then_some(self.suites.as_slice()),
            dry_run: self.dry_run,
            skip_run: self.skip_run,
            fail_on_suite_failure: self.fail_on_suite_failure,
            log_level: self.log_level.as_deref(),
        }
    }
}
