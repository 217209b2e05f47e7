//! Merging per-suite result files into one document.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::error::SuitesResult;
use crate::fs_helpers;

use super::AGGREGATE_FILE;
use super::junit::{CaseVerdict, SuiteResult, parse_results};
use super::manifest::read_manifest;
use super::xml_writer::{XML_DECLARATION, XmlWriter, seconds};

/// One manifest entry after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AggregateEntry {
    /// The result file was read and parsed.
    Available {
        /// Manifest entry the suites came from.
        file: String,
        /// Suites found in the file.
        suites: Vec<SuiteResult>,
    },
    /// The result file was missing or malformed.
    Unavailable {
        /// Manifest entry that could not be used.
        file: String,
        /// Why the file was skipped.
        reason: String,
    },
}

/// Summed counts across every available suite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Number of suites.
    pub suites: u32,
    /// Number of cases.
    pub tests: u32,
    /// Number of failed cases.
    pub failures: u32,
    /// Number of errored cases.
    pub errors: u32,
    /// Number of skipped cases.
    pub skipped: u32,
    /// Summed suite durations.
    pub time: Duration,
}

impl Totals {
    fn add(&mut self, suite: &SuiteResult) {
        self.suites = self.suites.saturating_add(1);
        self.tests = self.tests.saturating_add(suite.tests);
        self.failures = self.failures.saturating_add(suite.failures);
        self.errors = self.errors.saturating_add(suite.errors);
        self.skipped = self.skipped.saturating_add(suite.skipped);
        self.time = self.time.saturating_add(suite.time);
    }
}

/// Every manifest entry, in manifest order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    entries: Vec<AggregateEntry>,
}

impl Aggregate {
    /// Builds an aggregate from already-loaded entries.
    #[must_use]
    pub const fn from_entries(entries: Vec<AggregateEntry>) -> Self {
        Self { entries }
    }

    /// Entries in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    /// Every available suite, in manifest order.
    pub fn suites(&self) -> impl Iterator<Item = &SuiteResult> {
        self.entries.iter().flat_map(|entry| match entry {
            AggregateEntry::Available { suites, .. } => suites.as_slice(),
            AggregateEntry::Unavailable { .. } => &[],
        })
    }

    /// `(file, reason)` for every unusable entry.
    pub fn unavailable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            AggregateEntry::Unavailable { file, reason } => Some((file.as_str(), reason.as_str())),
            AggregateEntry::Available { .. } => None,
        })
    }

    /// Totals over the available suites.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for suite in self.suites() {
            totals.add(suite);
        }
        totals
    }

    /// Whether any available suite reported failures or errors.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.suites().any(|suite| !suite.is_clean())
    }
}

/// Loads every result file listed in the manifest.
///
/// Entries resolve against `report_dir`. A missing or malformed file becomes
/// an [`AggregateEntry::Unavailable`] and aggregation carries on.
///
/// # Errors
///
/// Fails only when the manifest itself cannot be read or parsed.
pub fn aggregate(report_dir: &Utf8Path, manifest_path: &Utf8Path) -> SuitesResult<Aggregate> {
    let files = read_manifest(manifest_path)?;
    let entries = files
        .into_iter()
        .map(|file| load_entry(report_dir, file))
        .collect();
    Ok(Aggregate::from_entries(entries))
}

fn load_entry(report_dir: &Utf8Path, file: String) -> AggregateEntry {
    let path = report_dir.join(&file);
    let loaded = fs_helpers::read_to_string(&path)
        .and_then(|text| parse_results(&text, path.as_str()));
    match loaded {
        Ok(suites) => {
            debug!(path = %path, suites = suites.len(), "loaded result file");
            AggregateEntry::Available { file, suites }
        }
        Err(err) => {
            warn!(path = %path, error = %err, "result file unavailable");
            AggregateEntry::Unavailable {
                file,
                reason: err.to_string(),
            }
        }
    }
}

/// Renders the aggregate as a `<testsuites>` document.
#[must_use]
pub fn render_aggregate(aggregate: &Aggregate) -> String {
    let totals = aggregate.totals();
    let mut writer = XmlWriter::new();
    writer.line(XML_DECLARATION);
    writer.open(
        "testsuites",
        &[
            ("tests", Some(totals.tests.to_string().as_str())),
            ("failures", Some(totals.failures.to_string().as_str())),
            ("errors", Some(totals.errors.to_string().as_str())),
            ("skipped", Some(totals.skipped.to_string().as_str())),
            ("time", Some(seconds(totals.time).as_str())),
        ],
    );
    for suite in aggregate.suites() {
        write_suite(&mut writer, suite);
    }
    for (file, reason) in aggregate.unavailable() {
        writer.empty("unavailable", &[("file", Some(file)), ("reason", Some(reason))]);
    }
    writer.close("testsuites");
    writer.finish()
}

fn write_suite(writer: &mut XmlWriter, suite: &SuiteResult) {
    writer.open(
        "testsuite",
        &[
            ("name", Some(suite.name.as_str())),
            ("tests", Some(suite.tests.to_string().as_str())),
            ("failures", Some(suite.failures.to_string().as_str())),
            ("errors", Some(suite.errors.to_string().as_str())),
            ("skipped", Some(suite.skipped.to_string().as_str())),
            ("time", Some(seconds(suite.time).as_str())),
        ],
    );
    for case in &suite.cases {
        let time = seconds(case.time);
        let attrs = [
            ("name", Some(case.name.as_str())),
            ("classname", case.class_name.as_deref()),
            ("time", Some(time.as_str())),
        ];
        match &case.verdict {
            CaseVerdict::Passed => writer.empty("testcase", &attrs),
            CaseVerdict::Skipped => {
                writer.open("testcase", &attrs);
                writer.empty("skipped", &[]);
                writer.close("testcase");
            }
            CaseVerdict::Failed { message, detail } | CaseVerdict::Errored { message, detail } => {
                let tag = if matches!(case.verdict, CaseVerdict::Failed { .. }) {
                    "failure"
                } else {
                    "error"
                };
                writer.open("testcase", &attrs);
                let outcome = [("message", message.as_deref())];
                match detail {
                    Some(text) => writer.text(tag, &outcome, text),
                    None => writer.empty(tag, &outcome),
                }
                writer.close("testcase");
            }
        }
    }
    writer.close("testsuite");
}

/// Writes `all-testsuite-results.xml` into `report_dir`.
///
/// # Errors
///
/// Returns [`crate::SuitesError::Io`] when the file cannot be written.
pub fn write_aggregate(report_dir: &Utf8Path, aggregate: &Aggregate) -> SuitesResult<Utf8PathBuf> {
    fs_helpers::write_file(report_dir, AGGREGATE_FILE, &render_aggregate(aggregate))
}
