//! Console output for dry runs and finished runs.

use std::io::{self, Write};

use soap_suites::{PipelineSummary, RunnerInvocation, SuiteStatus};

/// Writes one command line per planned invocation.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_plan<W: Write>(out: &mut W, plan: &[RunnerInvocation]) -> io::Result<()> {
    for invocation in plan {
        writeln!(out, "{}", invocation.display_line())?;
    }
    Ok(())
}

/// Writes a per-suite status table followed by totals and the report path.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_summary<W: Write>(out: &mut W, summary: &PipelineSummary) -> io::Result<()> {
    if let Some(run) = &summary.run {
        for outcome in run.outcomes() {
            let status = match &outcome.status {
                SuiteStatus::Passed => "passed".to_owned(),
                SuiteStatus::Failed { code: Some(code) } => format!("exited with {code}"),
                SuiteStatus::Failed { code: None } => "terminated by signal".to_owned(),
                SuiteStatus::LaunchFailed { message } => format!("not launched: {message}"),
            };
            writeln!(
                out,
                "{:<32} {status} ({:.1}s)",
                outcome.suite,
                outcome.elapsed.as_secs_f32()
            )?;
        }
    }
    let totals = summary.aggregate.totals();
    writeln!(
        out,
        "{} suites, {} tests, {} failures, {} errors, {} skipped",
        totals.suites, totals.tests, totals.failures, totals.errors, totals.skipped
    )?;
    let unavailable = summary.aggregate.unavailable().count();
    if unavailable > 0 {
        writeln!(out, "{unavailable} result files unavailable")?;
    }
    writeln!(out, "report: {}", summary.html_path)
}
