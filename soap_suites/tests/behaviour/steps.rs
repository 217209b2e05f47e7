//! Step definitions driving [`soap_suites::Pipeline`] against a fake runner.

use super::fixtures::{PipelineState, RUNNER_DIR};
use rstest_bdd_macros::{given, then, when};
use soap_suites::{Pipeline, SuiteStatus};
use test_helpers::RunnerWorkspace;
use test_helpers::junit::{Case, suite_xml};

fn with_workspace<T>(state: &PipelineState, f: impl FnOnce(&RunnerWorkspace) -> T) -> T {
    state
        .workspace
        .with_ref(f)
        .expect("a runner workspace must have been created")
}

fn with_summary<T>(
    state: &PipelineState,
    f: impl FnOnce(&soap_suites::PipelineSummary) -> T,
) -> T {
    state
        .summary
        .with_ref(f)
        .expect("the pipeline must have run")
}

#[given("a runner workspace with a fake SoapUI runner")]
fn fake_runner(pipeline_state: &PipelineState) {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace
        .install_fake_runner(RUNNER_DIR)
        .expect("install fake runner");
    pipeline_state.workspace.set(workspace);
}

#[given("runner properties declaring suites {suites}")]
fn runner_properties(pipeline_state: &PipelineState, suites: String) {
    with_workspace(pipeline_state, |workspace| {
        workspace
            .write_runner_properties(&format!(
                concat!(
                    "soapui.test-suites = {}\n",
                    "soapui.report.dir = reports\n",
                    "soapui.report.title = Nightly services\n",
                    "soapui.project = services-soapui-project.xml\n",
                    "soapui.testrunner.path = {}\n",
                    "soapui.testrunner.script = testrunner.sh\n",
                    "endpoint = http://shared.example\n",
                ),
                suites, RUNNER_DIR
            ))
            .expect("write runner properties");
    });
}

#[given("suite {suite} overrides endpoint with {endpoint}")]
fn suite_override(pipeline_state: &PipelineState, suite: String, endpoint: String) {
    with_workspace(pipeline_state, |workspace| {
        workspace
            .write_suite_overrides(&suite, &format!("endpoint = {endpoint}\n"))
            .expect("write overrides");
    });
}

#[given("an existing passing result for {suite}")]
fn existing_result(pipeline_state: &PipelineState, suite: String) {
    with_workspace(pipeline_state, |workspace| {
        workspace
            .write_result("reports", &suite, &suite_xml(&suite, &[Case::Pass("ping")]))
            .expect("write result");
    });
}

fn run_pipeline(pipeline_state: &PipelineState, skip: bool) {
    let summary = with_workspace(pipeline_state, |workspace| {
        Pipeline::new(workspace.runner_properties())
            .skip_execution(skip)
            .run()
            .expect("pipeline should complete")
    });
    pipeline_state.summary.set(summary);
}

#[when("the pipeline runs")]
fn pipeline_runs(pipeline_state: &PipelineState) {
    run_pipeline(pipeline_state, false);
}

#[when("the pipeline runs without launching suites")]
fn pipeline_runs_without_launching(pipeline_state: &PipelineState) {
    run_pipeline(pipeline_state, true);
}

#[then("{count:usize} suites were launched")]
fn suites_launched(pipeline_state: &PipelineState, count: usize) {
    let launched = with_summary(pipeline_state, |summary| {
        summary.run.as_ref().map(|run| run.outcomes().len())
    });
    assert_eq!(launched, Some(count));
    let log = with_workspace(pipeline_state, |workspace| {
        workspace.read(&format!("{RUNNER_DIR}/invocations.log"))
    })
    .expect("the fake runner logs every invocation");
    assert_eq!(log.lines().count(), count);
}

#[then("no suites were launched")]
fn no_suites_launched(pipeline_state: &PipelineState) {
    assert!(with_summary(pipeline_state, |summary| summary.run.is_none()));
    let log = with_workspace(pipeline_state, |workspace| {
        workspace.read(&format!("{RUNNER_DIR}/invocations.log"))
    });
    assert!(log.is_err(), "the fake runner must not have been called");
}

#[then("suite {suite} exited with code {code:i32}")]
fn suite_exit_code(pipeline_state: &PipelineState, suite: String, code: i32) {
    let status = with_summary(pipeline_state, |summary| {
        summary
            .run
            .as_ref()
            .and_then(|run| run.outcome(&suite))
            .map(|outcome| outcome.status.clone())
    });
    assert_eq!(status, Some(SuiteStatus::Failed { code: Some(code) }));
    assert!(with_summary(pipeline_state, soap_suites::PipelineSummary::has_failures));
}

#[then("suite {suite} was called against {endpoint}")]
fn suite_called_against(pipeline_state: &PipelineState, suite: String, endpoint: String) {
    let log = with_workspace(pipeline_state, |workspace| {
        workspace.read(soap_suites::keys::DEFAULT_RUNNER_LOG)
    })
    .expect("runner output is appended to the runner log");
    assert!(
        log.contains(&format!("fake runner: {suite} against {endpoint}")),
        "runner log was: {log}"
    );
}

#[then("the aggregate holds {suites:u32} suites with {failures:u32} failures")]
fn aggregate_totals(pipeline_state: &PipelineState, suites: u32, failures: u32) {
    let totals = with_summary(pipeline_state, |summary| summary.aggregate.totals());
    assert_eq!((totals.suites, totals.failures), (suites, failures));
    let html = with_workspace(pipeline_state, |workspace| workspace.read("reports/report.html"))
        .expect("the HTML report is written");
    assert!(html.contains("<title>Nightly services</title>"));
}

#[then("the report marks {file} as unavailable")]
fn report_marks_unavailable(pipeline_state: &PipelineState, file: String) {
    let unavailable: Vec<String> = with_summary(pipeline_state, |summary| {
        summary
            .aggregate
            .unavailable()
            .map(|(name, _)| name.to_owned())
            .collect()
    });
    assert_eq!(unavailable, [file.clone()]);
    let xml = with_workspace(pipeline_state, |workspace| {
        workspace.read("reports/all-testsuite-results.xml")
    })
    .expect("the aggregate document is written");
    assert!(xml.contains(&format!(r#"<unavailable file="{file}""#)));
}
