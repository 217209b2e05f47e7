//! Layered settings for the runner itself.
//!
//! Values come from built-in defaults, then the TOML settings file, then
//! `SOAP_SUITE_RUNNER_*` environment variables, and finally the flags the
//! user passed on the command line.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Args;
use crate::error::{CliError, CliResult};

/// Environment prefix for settings overrides.
pub const ENV_PREFIX: &str = "SOAP_SUITE_RUNNER_";
/// Settings file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "soap-suite-runner.toml";
/// Runner properties file used when none is configured.
pub const DEFAULT_PROPERTIES_FILE: &str = "runner.properties";
/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fully merged runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Runner properties file.
    pub properties: Utf8PathBuf,
    /// Report directory override.
    pub report_dir: Option<Utf8PathBuf>,
    /// Suites to run; empty means all.
    pub suites: Vec<String>,
    /// Print invocations instead of running them.
    pub dry_run: bool,
    /// Aggregate without launching the runner.
    pub skip_run: bool,
    /// Exit unsuccessfully when any suite fails.
    pub fail_on_suite_failure: bool,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            properties: Utf8PathBuf::from(DEFAULT_PROPERTIES_FILE),
            report_dir: None,
            suites: Vec::new(),
            dry_run: false,
            skip_run: false,
            fail_on_suite_failure: false,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

/// Builds the settings stack for `args` without extracting it.
///
/// # Errors
///
/// Returns [`CliError::MissingConfig`] when `--config` names a file that
/// does not exist.
pub fn settings_figment(args: &Args) -> CliResult<Figment> {
    let mut figment = Figment::from(Serialized::defaults(CliSettings::default()));
    if let Some(path) = config_file(args)? {
        debug!(path = %path, "reading settings file");
        figment = figment.merge(Toml::file(path.as_std_path()));
    }
    Ok(figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(args.provided())))
}

/// Loads the merged settings for `args`.
///
/// # Errors
///
/// Returns [`CliError::MissingConfig`] for an absent `--config` file and
/// [`CliError::Settings`] when a layer holds an invalid value.
pub fn load_settings(args: &Args) -> CliResult<CliSettings> {
    Ok(settings_figment(args)?.extract()?)
}

fn config_file(args: &Args) -> CliResult<Option<Utf8PathBuf>> {
    match &args.config {
        Some(path) if path.is_file() => Ok(Some(path.clone())),
        Some(path) => Err(CliError::MissingConfig(path.clone())),
        None => {
            let fallback = Utf8Path::new(DEFAULT_CONFIG_FILE);
            Ok(fallback.is_file().then(|| fallback.to_path_buf()))
        }
    }
}
