//! Suite discovery and per-suite configuration.
//!
//! The runner properties name the suites to run in `soapui.test-suites`. Each
//! suite may carry a `<suite>.properties` file whose entries shadow the
//! runner properties for that suite only.

pub mod keys;
mod settings;
#[cfg(test)]
mod tests;

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::error::{SuitesError, SuitesResult};
use crate::layers::{LayeredProperties, PropertyLayer};
use crate::properties::Properties;

pub use settings::RunnerSettings;

/// A suite together with its resolved configuration stack.
#[derive(Clone, Debug)]
pub struct SuiteDescriptor {
    name: String,
    properties: LayeredProperties,
    base_dir: Utf8PathBuf,
    report_dir_override: Option<Utf8PathBuf>,
}

impl SuiteDescriptor {
    /// Builds a descriptor from its name and layer stack.
    ///
    /// Relative paths read from the stack resolve against `base_dir`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        properties: LayeredProperties,
        base_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            properties,
            base_dir: base_dir.into(),
            report_dir_override: None,
        }
    }

    /// The suite name as declared in `soapui.test-suites`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suite's configuration stack.
    #[must_use]
    pub const fn properties(&self) -> &LayeredProperties {
        &self.properties
    }

    fn scope(&self) -> String {
        format!("suite '{}'", self.name)
    }

    fn required(&self, key: &str) -> SuitesResult<String> {
        self.properties
            .get_non_blank(key)
            .ok_or_else(|| SuitesError::missing_key(key, self.scope()))
    }

    fn required_path(&self, key: &str) -> SuitesResult<Utf8PathBuf> {
        self.required(key)
            .map(|value| resolve_path(&self.base_dir, &value))
    }

    /// Path to the SoapUI project file.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::MissingKey`] when `soapui.project` is unset.
    pub fn project_path(&self) -> SuitesResult<Utf8PathBuf> {
        self.required_path(keys::PROJECT)
    }

    /// Directory the runner writes this suite's results into.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::MissingKey`] when `soapui.report.dir` is unset
    /// and no override was applied.
    pub fn report_dir(&self) -> SuitesResult<Utf8PathBuf> {
        self.report_dir_override
            .as_ref()
            .map_or_else(|| self.required_path(keys::REPORT_DIR), |dir| Ok(dir.clone()))
    }

    /// Directory holding the runner script.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::MissingKey`] when `soapui.testrunner.path` is
    /// unset.
    pub fn runner_dir(&self) -> SuitesResult<Utf8PathBuf> {
        self.required_path(keys::TESTRUNNER_PATH)
    }

    /// File name of the runner script inside [`Self::runner_dir`].
    #[must_use]
    pub fn runner_script(&self) -> String {
        self.properties
            .get_non_blank(keys::TESTRUNNER_SCRIPT)
            .unwrap_or_else(|| keys::DEFAULT_TESTRUNNER_SCRIPT.to_owned())
    }

    /// Flags passed to the runner between the suite and report arguments.
    #[must_use]
    pub fn runner_flags(&self) -> Vec<String> {
        self.properties
            .get(keys::TESTRUNNER_ARGS)
            .unwrap_or_else(|| keys::DEFAULT_TESTRUNNER_ARGS.to_owned())
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Whether the runner inherits this process's environment.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::InvalidValue`] when the value is neither `true`
    /// nor `false`.
    pub fn inherit_env(&self) -> SuitesResult<bool> {
        let Some(value) = self.properties.get_non_blank(keys::INHERIT_ENV) else {
            return Ok(false);
        };
        parse_bool(keys::INHERIT_ENV, &value)
    }

    /// Name of the JUnit report the runner writes for this suite.
    #[must_use]
    pub fn result_file_name(&self) -> String {
        format!("TEST-{}.xml", self.name)
    }

    /// The suite's configuration collapsed into one document, as handed to
    /// the runner.
    #[must_use]
    pub fn overrides(&self) -> Properties {
        self.properties.flatten()
    }

    fn override_report_dir(&mut self, dir: Utf8PathBuf) {
        self.report_dir_override = Some(dir);
    }
}

/// Every suite declared by a runner properties file, in declaration order.
#[derive(Clone, Debug)]
pub struct SuiteCatalogue {
    settings: RunnerSettings,
    suites: Vec<SuiteDescriptor>,
}

impl SuiteCatalogue {
    /// Loads the runner properties at `path` and every suite's overrides.
    ///
    /// # Errors
    ///
    /// Fails when the runner properties cannot be read, declare no suites,
    /// lack `soapui.report.dir`, or when an existing overrides file is
    /// malformed.
    pub fn assemble(path: &Utf8Path) -> SuitesResult<Self> {
        let runner = Properties::load(path)?;
        let mut runner_only = LayeredProperties::new();
        runner_only.push(PropertyLayer::runner_properties(
            runner.clone(),
            Some(path.to_path_buf()),
        ));
        let settings = RunnerSettings::resolve(&runner_only, path)?;

        let declared = runner_only
            .get(keys::TEST_SUITES)
            .ok_or_else(|| SuitesError::missing_key(keys::TEST_SUITES, settings.scope()))?;
        let names = parse_suite_names(&declared);
        if names.is_empty() {
            return Err(SuitesError::NoSuites(path.to_path_buf()));
        }

        let mut suites = Vec::with_capacity(names.len());
        for name in names {
            let overrides_path = settings.suites_dir.join(format!("{name}.properties"));
            let overrides = load_overrides(&overrides_path)?;
            let mut layers = LayeredProperties::new();
            layers.push(PropertyLayer::suite_overrides(
                overrides,
                Some(overrides_path),
            ));
            layers.push(PropertyLayer::runner_properties(
                runner.clone(),
                Some(path.to_path_buf()),
            ));
            suites.push(SuiteDescriptor::new(name, layers, settings.base_dir.clone()));
        }

        Ok(Self { settings, suites })
    }

    /// Tool-level settings read from the runner properties.
    #[must_use]
    pub const fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Suites in declaration order.
    #[must_use]
    pub fn suites(&self) -> &[SuiteDescriptor] {
        &self.suites
    }

    /// Keeps only the suites named in `names`, preserving declaration order.
    ///
    /// An empty `names` keeps every suite.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::UnknownSuite`] for a name that is not declared.
    pub fn retain(&mut self, names: &[String]) -> SuitesResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.suites.iter().any(|suite| suite.name() == name.as_str()))
        {
            return Err(SuitesError::UnknownSuite(unknown.clone()));
        }
        self.suites
            .retain(|suite| names.iter().any(|name| name == suite.name()));
        Ok(())
    }

    /// Redirects every suite's results, and the aggregate reports, to `dir`.
    pub fn override_report_dir(&mut self, dir: &Utf8Path) {
        let resolved = resolve_path(&self.settings.base_dir, dir.as_str());
        for suite in &mut self.suites {
            suite.override_report_dir(resolved.clone());
        }
        self.settings.report_dir = resolved;
    }
}

/// Splits a `;`-separated suite list, dropping blanks and repeats.
fn parse_suite_names(declared: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for name in declared.split(';').map(str::trim).filter(|name| !name.is_empty()) {
        if seen.insert(name) {
            names.push(name.to_owned());
        } else {
            warn!(suite = name, "suite declared more than once; ignoring repeat");
        }
    }
    names
}

fn load_overrides(path: &Utf8Path) -> SuitesResult<Properties> {
    if !path.is_file() {
        debug!(path = %path, "no overrides file; suite uses runner properties only");
        return Ok(Properties::new());
    }
    debug!(path = %path, "loading suite overrides");
    Properties::load(path)
}

pub(crate) fn resolve_path(base: &Utf8Path, value: &str) -> Utf8PathBuf {
    let candidate = Utf8Path::new(value);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}

pub(crate) fn parse_bool(key: &str, value: &str) -> SuitesResult<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SuitesError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
            message: "expected 'true' or 'false'".to_owned(),
        })
    }
}
