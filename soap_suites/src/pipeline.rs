//! End-to-end orchestration: assemble, run, aggregate, render.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::catalogue::SuiteCatalogue;
use crate::error::SuitesResult;
use crate::execute::{RunReport, execute_suites};
use crate::invocation::RunnerInvocation;
use crate::report::{self, Aggregate};

/// Configures and runs the whole suite pipeline.
///
/// ```no_run
/// use soap_suites::Pipeline;
///
/// let summary = Pipeline::new("runner.properties")
///     .suites(vec!["Orders".to_owned()])
///     .run()?;
/// println!("{}", summary.html_path);
/// # Ok::<(), soap_suites::SuitesError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    properties_path: Utf8PathBuf,
    suites: Vec<String>,
    report_dir: Option<Utf8PathBuf>,
    skip_execution: bool,
}

/// What a pipeline run produced.
#[derive(Clone, Debug)]
pub struct PipelineSummary {
    /// Runner outcomes, absent when execution was skipped.
    pub run: Option<RunReport>,
    /// Combined results.
    pub aggregate: Aggregate,
    /// The `all-testsuites.xml` manifest.
    pub manifest_path: Utf8PathBuf,
    /// The `all-testsuite-results.xml` document.
    pub aggregate_path: Utf8PathBuf,
    /// The `report.html` page.
    pub html_path: Utf8PathBuf,
}

impl PipelineSummary {
    /// Whether any suite failed to launch, exited unsuccessfully, or reported
    /// failures or errors.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.run.as_ref().is_some_and(RunReport::has_failures) || self.aggregate.has_failures()
    }
}

impl Pipeline {
    /// Starts a pipeline reading the runner properties at `properties_path`.
    #[must_use]
    pub fn new(properties_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            properties_path: properties_path.into(),
            suites: Vec::new(),
            report_dir: None,
            skip_execution: false,
        }
    }

    /// Restricts the run to `names`. An empty list runs every suite.
    #[must_use]
    pub fn suites(mut self, names: Vec<String>) -> Self {
        self.suites = names;
        self
    }

    /// Sends results and reports to `dir` instead of `soapui.report.dir`.
    #[must_use]
    pub fn report_dir(mut self, dir: Option<Utf8PathBuf>) -> Self {
        self.report_dir = dir;
        self
    }

    /// Aggregates existing result files without launching the runner.
    #[must_use]
    pub const fn skip_execution(mut self, skip: bool) -> Self {
        self.skip_execution = skip;
        self
    }

    fn catalogue(&self) -> SuitesResult<SuiteCatalogue> {
        let mut catalogue = SuiteCatalogue::assemble(&self.properties_path)?;
        catalogue.retain(&self.suites)?;
        if let Some(dir) = &self.report_dir {
            catalogue.override_report_dir(dir);
        }
        Ok(catalogue)
    }

    /// Runs every stage and writes the manifest, aggregate, and HTML report.
    ///
    /// # Errors
    ///
    /// Fails when the configuration cannot be assembled, an overrides file
    /// cannot be created, or a report cannot be written. Individual suite
    /// failures are recorded in the summary instead.
    pub fn run(&self) -> SuitesResult<PipelineSummary> {
        let catalogue = self.catalogue()?;
        let settings = catalogue.settings();
        info!(
            properties = %self.properties_path,
            suites = catalogue.suites().len(),
            "assembled suite catalogue"
        );

        let run = if self.skip_execution {
            info!("skipping runner execution");
            None
        } else {
            Some(execute_suites(&catalogue)?)
        };

        let report_dir = &settings.report_dir;
        let manifest_path = report::write_manifest(report_dir, &catalogue)?;
        let aggregate = report::aggregate(report_dir, &manifest_path)?;
        let aggregate_path = report::write_aggregate(report_dir, &aggregate)?;
        let html_path = report::write_html(report_dir, &aggregate, &settings.report_title)?;

        let totals = aggregate.totals();
        info!(
            tests = totals.tests,
            failures = totals.failures,
            errors = totals.errors,
            report = %html_path,
            "report written"
        );

        Ok(PipelineSummary {
            run,
            aggregate,
            manifest_path,
            aggregate_path,
            html_path,
        })
    }

    /// Builds each suite's invocation without running anything.
    ///
    /// Overrides paths are placeholders in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Fails when the configuration cannot be assembled or a suite lacks a
    /// required key.
    pub fn plan(&self) -> SuitesResult<Vec<RunnerInvocation>> {
        let catalogue = self.catalogue()?;
        let temp_dir = Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .unwrap_or_else(|_| Utf8PathBuf::from("."));
        let log_file: &Utf8Path = &catalogue.settings().runner_log;
        catalogue
            .suites()
            .iter()
            .map(|suite| {
                let placeholder = temp_dir.join(format!("{}.properties", suite.name()));
                RunnerInvocation::for_suite(suite, &placeholder, log_file)
            })
            .collect()
    }
}
