//! Runs SoapUI test suites with layered per-suite configuration and
//! aggregates their results into one report.
//!
//! The runner properties name the suites to run. Each suite's own
//! `<suite>.properties` shadows the shared values; the merged result is
//! handed to the external `testrunner` through a temporary overrides file.
//! Once every suite has run, the JUnit reports are combined into
//! `all-testsuite-results.xml` and `report.html`.
//!
//! Most callers only need [`Pipeline`]; the individual stages are public for
//! tools that want to drive them separately.

pub mod catalogue;
mod error;
pub mod execute;
mod fs_helpers;
pub mod invocation;
pub mod layers;
mod pipeline;
pub mod properties;
pub mod report;

pub use catalogue::{RunnerSettings, SuiteCatalogue, SuiteDescriptor, keys};
pub use error::{SuitesError, SuitesResult};
pub use execute::{RunReport, SuiteOutcome, SuiteStatus, execute_suites};
pub use invocation::{OVERRIDE_ENV, RunnerInvocation};
pub use layers::{LayerProvenance, LayeredProperties, PropertyLayer};
pub use pipeline::{Pipeline, PipelineSummary};
pub use properties::Properties;
