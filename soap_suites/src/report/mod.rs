//! Result aggregation and HTML reporting.
//!
//! After the suites have run, the report directory holds one JUnit-style
//! `TEST-<suite>.xml` per suite. A manifest lists those files; aggregation
//! reads each one, tolerating missing or broken files, and the combined
//! result is written both as XML and as a standalone HTML page.

mod aggregate;
mod html;
mod junit;
mod manifest;
mod tree;
mod xml_writer;

pub use aggregate::{
    Aggregate, AggregateEntry, Totals, aggregate, render_aggregate, write_aggregate,
};
pub use html::{render_html, write_html};
pub use junit::{CaseResult, CaseVerdict, SuiteResult, parse_results};
pub use manifest::{parse_manifest, read_manifest, render_manifest, write_manifest};

/// Manifest listing the result files to aggregate.
pub const MANIFEST_FILE: &str = "all-testsuites.xml";
/// Combined results of every suite.
pub const AGGREGATE_FILE: &str = "all-testsuite-results.xml";
/// HTML summary.
pub const HTML_FILE: &str = "report.html";
