//! Property keys understood by the runner.

/// `;`-separated list of suites to run.
pub const TEST_SUITES: &str = "soapui.test-suites";
/// Directory receiving result files and the generated reports.
pub const REPORT_DIR: &str = "soapui.report.dir";
/// Title of the HTML report.
pub const REPORT_TITLE: &str = "soapui.report.title";
/// Directory holding `<suite>.properties` overrides.
pub const SUITES_DIR: &str = "soapui.suites.dir";
/// File collecting the runner's console output.
pub const RUNNER_LOG: &str = "soapui.runner.log";
/// Whether the runner inherits this process's environment.
pub const INHERIT_ENV: &str = "soapui.runner.inherit-env";
/// SoapUI project file.
pub const PROJECT: &str = "soapui.project";
/// Directory holding the runner script.
pub const TESTRUNNER_PATH: &str = "soapui.testrunner.path";
/// Runner script file name.
pub const TESTRUNNER_SCRIPT: &str = "soapui.testrunner.script";
/// Whitespace-separated runner flags.
pub const TESTRUNNER_ARGS: &str = "soapui.testrunner.args";

/// Runner script used when none is configured.
#[cfg(windows)]
pub const DEFAULT_TESTRUNNER_SCRIPT: &str = "testrunner.bat";
/// Runner script used when none is configured.
#[cfg(not(windows))]
pub const DEFAULT_TESTRUNNER_SCRIPT: &str = "testrunner.sh";

/// Print a report, export all results, write JUnit reports, and ignore
/// errors so every test case runs.
pub const DEFAULT_TESTRUNNER_ARGS: &str = "-r -a -j -I";
/// HTML title used when none is configured.
pub const DEFAULT_REPORT_TITLE: &str = "SOAP Suite Results";
/// Log file name used when none is configured.
pub const DEFAULT_RUNNER_LOG: &str = "soap-suite-runner.log";
