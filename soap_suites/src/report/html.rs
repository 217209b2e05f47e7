//! Standalone HTML summary of an [`Aggregate`].

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SuitesResult;
use crate::fs_helpers;

use super::HTML_FILE;
use super::aggregate::Aggregate;
use super::junit::{CaseVerdict, SuiteResult};
use super::xml_writer::{XmlWriter, escape_xml, seconds};

const STYLE: &str = concat!(
    "body{font-family:sans-serif;margin:2em;color:#222}",
    "table{border-collapse:collapse;margin-bottom:1.5em}",
    "th,td{border:1px solid #ccc;padding:.3em .6em;text-align:left}",
    "th{background:#eee}",
    "tr.pass td:first-child{border-left:4px solid #2a7}",
    "tr.fail td:first-child{border-left:4px solid #c33}",
    "tr.unavailable{color:#888}",
    "pre{white-space:pre-wrap;margin:0}",
);

const SUMMARY_HEADINGS: [&str; 6] = ["Suite", "Tests", "Failures", "Errors", "Skipped", "Time (s)"];

/// Renders the aggregate as a self-contained HTML page.
#[must_use]
pub fn render_html(aggregate: &Aggregate, title: &str) -> String {
    let mut html = XmlWriter::new();
    html.line("<!DOCTYPE html>");
    html.open("html", &[("lang", Some("en"))]);
    html.open("head", &[]);
    html.line(r#"<meta charset="utf-8">"#);
    html.text("title", &[], title);
    html.text("style", &[], STYLE);
    html.close("head");
    html.open("body", &[]);
    html.text("h1", &[], title);

    write_totals(&mut html, aggregate);
    write_summary(&mut html, aggregate);
    for (index, suite) in aggregate.suites().enumerate() {
        write_cases(&mut html, index, suite);
    }

    html.close("body");
    html.close("html");
    html.finish()
}

fn header_row(html: &mut XmlWriter, headings: &[&str]) {
    html.open("tr", &[]);
    for heading in headings {
        html.text("th", &[], heading);
    }
    html.close("tr");
}

fn write_totals(html: &mut XmlWriter, aggregate: &Aggregate) {
    let totals = aggregate.totals();
    html.open("table", &[("class", Some("totals"))]);
    header_row(
        html,
        &["Suites", "Tests", "Failures", "Errors", "Skipped", "Unavailable", "Time (s)"],
    );
    html.open("tr", &[]);
    for cell in [
        totals.suites.to_string(),
        totals.tests.to_string(),
        totals.failures.to_string(),
        totals.errors.to_string(),
        totals.skipped.to_string(),
        aggregate.unavailable().count().to_string(),
        seconds(totals.time),
    ] {
        html.text("td", &[], &cell);
    }
    html.close("tr");
    html.close("table");
}

fn write_summary(html: &mut XmlWriter, aggregate: &Aggregate) {
    html.text("h2", &[], "Suites");
    html.open("table", &[("class", Some("suites"))]);
    header_row(html, &SUMMARY_HEADINGS);
    for (index, suite) in aggregate.suites().enumerate() {
        let class = if suite.is_clean() { "pass" } else { "fail" };
        html.open("tr", &[("class", Some(class))]);
        html.line(&format!(
            r##"<td><a href="#suite-{index}">{}</a></td>"##,
            escape_xml(&suite.name)
        ));
        for cell in [
            suite.tests.to_string(),
            suite.failures.to_string(),
            suite.errors.to_string(),
            suite.skipped.to_string(),
            seconds(suite.time),
        ] {
            html.text("td", &[], &cell);
        }
        html.close("tr");
    }
    for (file, reason) in aggregate.unavailable() {
        html.open("tr", &[("class", Some("unavailable"))]);
        html.text("td", &[], file);
        html.text("td", &[("colspan", Some("5"))], reason);
        html.close("tr");
    }
    html.close("table");
}

fn write_cases(html: &mut XmlWriter, index: usize, suite: &SuiteResult) {
    let anchor = format!("suite-{index}");
    html.text("h3", &[("id", Some(anchor.as_str()))], &suite.name);
    if suite.cases.is_empty() {
        html.text("p", &[], "No test cases reported.");
        return;
    }
    html.open("table", &[("class", Some("cases"))]);
    header_row(html, &["Case", "Class", "Result", "Time (s)", "Message"]);
    for case in &suite.cases {
        let class = match case.verdict {
            CaseVerdict::Passed | CaseVerdict::Skipped => "pass",
            CaseVerdict::Failed { .. } | CaseVerdict::Errored { .. } => "fail",
        };
        html.open("tr", &[("class", Some(class))]);
        html.text("td", &[], &case.name);
        html.text("td", &[], case.class_name.as_deref().unwrap_or_default());
        html.text("td", &[], case.verdict.label());
        html.text("td", &[], &seconds(case.time));
        match &case.verdict {
            CaseVerdict::Failed { message, detail } | CaseVerdict::Errored { message, detail } => {
                html.open("td", &[]);
                if let Some(text) = message {
                    html.text("p", &[], text);
                }
                if let Some(text) = detail {
                    html.text("pre", &[], text);
                }
                html.close("td");
            }
            CaseVerdict::Passed | CaseVerdict::Skipped => html.line("<td></td>"),
        }
        html.close("tr");
    }
    html.close("table");
}

/// Writes `report.html` into `report_dir`.
///
/// # Errors
///
/// Returns [`crate::SuitesError::Io`] when the file cannot be written.
pub fn write_html(report_dir: &Utf8Path, aggregate: &Aggregate, title: &str) -> SuitesResult<Utf8PathBuf> {
    fs_helpers::write_file(report_dir, HTML_FILE, &render_html(aggregate, title))
}
