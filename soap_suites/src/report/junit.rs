//! JUnit-style result files as written by the SoapUI runner.

use std::time::Duration;

use xot::{NameId, Node};

use crate::error::{SuitesError, SuitesResult};

use super::tree::Document;

/// Outcome of a single test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseVerdict {
    /// The case ran without assertion failures.
    Passed,
    /// An assertion failed.
    Failed {
        /// The `message` attribute, if any.
        message: Option<String>,
        /// Text content of the failure element.
        detail: Option<String>,
    },
    /// The case could not complete.
    Errored {
        /// The `message` attribute, if any.
        message: Option<String>,
        /// Text content of the error element.
        detail: Option<String>,
    },
    /// The case was not run.
    Skipped,
}

impl CaseVerdict {
    /// Short label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Errored { .. } => "error",
            Self::Skipped => "skipped",
        }
    }
}

/// One `<testcase>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseResult {
    /// Test case name.
    pub name: String,
    /// The `classname` attribute, if present.
    pub class_name: Option<String>,
    /// Reported duration.
    pub time: Duration,
    /// How the case ended.
    pub verdict: CaseVerdict,
}

/// One `<testsuite>` with its counts and cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteResult {
    /// Suite name.
    pub name: String,
    /// Number of cases run.
    pub tests: u32,
    /// Number of failed cases.
    pub failures: u32,
    /// Number of errored cases.
    pub errors: u32,
    /// Number of skipped cases.
    pub skipped: u32,
    /// Reported duration.
    pub time: Duration,
    /// Cases in document order.
    pub cases: Vec<CaseResult>,
}

impl SuiteResult {
    /// Whether the suite reported no failures and no errors.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

struct Names {
    testsuites: NameId,
    testsuite: NameId,
    testcase: NameId,
    failure: NameId,
    error: NameId,
    skipped: NameId,
    name: NameId,
    classname: NameId,
    tests: NameId,
    failures: NameId,
    errors: NameId,
    skipped_attr: NameId,
    time: NameId,
    message: NameId,
}

impl Names {
    fn intern(document: &mut Document) -> Self {
        Self {
            testsuites: document.name("testsuites"),
            testsuite: document.name("testsuite"),
            testcase: document.name("testcase"),
            failure: document.name("failure"),
            error: document.name("error"),
            skipped: document.name("skipped"),
            name: document.name("name"),
            classname: document.name("classname"),
            tests: document.name("tests"),
            failures: document.name("failures"),
            errors: document.name("errors"),
            skipped_attr: document.name("skipped"),
            time: document.name("time"),
            message: document.name("message"),
        }
    }
}

/// Parses a result file.
///
/// Accepts either a single `<testsuite>` root or a `<testsuites>` root
/// wrapping several. Count attributes win when present and numeric;
/// otherwise counts are derived from the cases.
///
/// # Errors
///
/// Returns [`SuitesError::Xml`] when the text is not well-formed or has some
/// other root element.
pub fn parse_results(xml: &str, source_name: &str) -> SuitesResult<Vec<SuiteResult>> {
    let mut document = Document::parse(xml, source_name)?;
    let names = Names::intern(&mut document);
    let root = document.root;

    if document.is(root, names.testsuite) {
        Ok(vec![parse_suite(&document, &names, root)])
    } else if document.is(root, names.testsuites) {
        Ok(document
            .children_named(root, names.testsuite)
            .map(|suite| parse_suite(&document, &names, suite))
            .collect())
    } else {
        Err(SuitesError::xml(
            source_name,
            "expected a <testsuite> or <testsuites> root element",
        ))
    }
}

fn parse_suite(document: &Document, names: &Names, node: Node) -> SuiteResult {
    let cases: Vec<CaseResult> = document
        .children_named(node, names.testcase)
        .map(|case| parse_case(document, names, case))
        .collect();
    let count = |attr: NameId, verdict: fn(&CaseVerdict) -> bool| {
        number_attr(document, node, attr).unwrap_or_else(|| {
            u32::try_from(cases.iter().filter(|case| verdict(&case.verdict)).count())
                .unwrap_or(u32::MAX)
        })
    };

    SuiteResult {
        name: document
            .attribute(node, names.name)
            .unwrap_or_default()
            .to_owned(),
        tests: count(names.tests, |_| true),
        failures: count(names.failures, |verdict| {
            matches!(verdict, CaseVerdict::Failed { .. })
        }),
        errors: count(names.errors, |verdict| {
            matches!(verdict, CaseVerdict::Errored { .. })
        }),
        skipped: count(names.skipped_attr, |verdict| {
            matches!(verdict, CaseVerdict::Skipped)
        }),
        time: time_attr(document, node, names.time)
            .unwrap_or_else(|| cases.iter().map(|case| case.time).sum()),
        cases,
    }
}

fn parse_case(document: &Document, names: &Names, node: Node) -> CaseResult {
    let outcome = |child: Node| {
        (
            document.attribute(child, names.message).map(ToOwned::to_owned),
            document.text(child),
        )
    };
    let verdict = if let Some(failure) = document.first_child_named(node, names.failure) {
        let (message, detail) = outcome(failure);
        CaseVerdict::Failed { message, detail }
    } else if let Some(error) = document.first_child_named(node, names.error) {
        let (message, detail) = outcome(error);
        CaseVerdict::Errored { message, detail }
    } else if document.first_child_named(node, names.skipped).is_some() {
        CaseVerdict::Skipped
    } else {
        CaseVerdict::Passed
    };

    CaseResult {
        name: document
            .attribute(node, names.name)
            .unwrap_or_default()
            .to_owned(),
        class_name: document.attribute(node, names.classname).map(ToOwned::to_owned),
        time: time_attr(document, node, names.time).unwrap_or_default(),
        verdict,
    }
}

fn number_attr(document: &Document, node: Node, name: NameId) -> Option<u32> {
    document.attribute(node, name)?.trim().parse().ok()
}

fn time_attr(document: &Document, node: Node, name: NameId) -> Option<Duration> {
    parse_seconds(document.attribute(node, name)?)
}

/// Parses decimal seconds such as `0.25` or `12`. Negative, non-finite, or
/// malformed values yield `None`.
pub(super) fn parse_seconds(text: &str) -> Option<Duration> {
    let seconds: f64 = text.trim().parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}
