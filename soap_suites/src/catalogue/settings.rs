//! Tool-level settings drawn from the runner properties.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{SuitesError, SuitesResult};
use crate::layers::LayeredProperties;

use super::{keys, resolve_path};

/// Settings that apply to the whole run rather than to one suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerSettings {
    /// The runner properties file these settings came from.
    pub properties_path: Utf8PathBuf,
    /// Directory relative paths resolve against.
    pub base_dir: Utf8PathBuf,
    /// Directory holding result files, the manifest, and generated reports.
    pub report_dir: Utf8PathBuf,
    /// Title of the HTML report.
    pub report_title: String,
    /// Directory searched for `<suite>.properties`.
    pub suites_dir: Utf8PathBuf,
    /// File collecting the runner's stdout and stderr.
    pub runner_log: Utf8PathBuf,
}

impl RunnerSettings {
    /// Reads the settings from a runner-properties stack.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::MissingKey`] when `soapui.report.dir` is unset.
    pub fn resolve(properties: &LayeredProperties, properties_path: &Utf8Path) -> SuitesResult<Self> {
        let base_dir = match properties_path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        let scope = format!("runner properties '{properties_path}'");

        let report_dir = properties
            .get_non_blank(keys::REPORT_DIR)
            .map(|dir| resolve_path(&base_dir, &dir))
            .ok_or_else(|| SuitesError::missing_key(keys::REPORT_DIR, scope))?;
        let report_title = properties
            .get_non_blank(keys::REPORT_TITLE)
            .unwrap_or_else(|| keys::DEFAULT_REPORT_TITLE.to_owned());
        let suites_dir = properties
            .get_non_blank(keys::SUITES_DIR)
            .map_or_else(|| base_dir.clone(), |dir| resolve_path(&base_dir, &dir));
        let runner_log = resolve_path(
            &base_dir,
            &properties
                .get_non_blank(keys::RUNNER_LOG)
                .unwrap_or_else(|| keys::DEFAULT_RUNNER_LOG.to_owned()),
        );

        Ok(Self {
            properties_path: properties_path.to_path_buf(),
            base_dir,
            report_dir,
            report_title,
            suites_dir,
            runner_log,
        })
    }

    pub(super) fn scope(&self) -> String {
        format!("runner properties '{}'", self.properties_path)
    }
}
