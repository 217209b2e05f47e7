//! Binary-level tests for `soap-suite-runner`.
//!
//! Each test runs the compiled binary inside its own workspace with a clean
//! `SOAP_SUITE_RUNNER_*` environment.

use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::RunnerWorkspace;
use test_helpers::junit::{Case, suite_xml};

const RUNNER_PROPERTIES: &str = concat!(
    "soapui.test-suites=Alpha;Beta\n",
    "soapui.report.dir=reports\n",
    "soapui.project=project.xml\n",
    "soapui.testrunner.path=/opt/soapui/bin\n",
    "soapui.testrunner.script=testrunner.sh\n",
);

#[fixture]
fn workspace() -> RunnerWorkspace {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace
        .write_runner_properties(RUNNER_PROPERTIES)
        .expect("write runner properties");
    workspace
}

/// Builds a command for the binary running in `workspace`.
fn runner(workspace: &RunnerWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("soap-suite-runner").expect("binary should exist");
    cmd.current_dir(workspace.root())
        .env_remove("RUST_LOG")
        .env("RUST_BACKTRACE", "0");
    for (key, _) in std::env::vars() {
        if key.starts_with("SOAP_SUITE_RUNNER_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command should execute");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[rstest]
fn dry_run_prints_one_line_per_suite(workspace: RunnerWorkspace) {
    let stdout = stdout_of(runner(&workspace).arg("--dry-run"));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {stdout}");
    assert!(lines.first().is_some_and(|line| line.contains("/opt/soapui/bin/testrunner.sh -sAlpha -r -a -j -I")));
    assert!(lines.get(1).is_some_and(|line| line.contains("-sBeta")));
}

#[rstest]
fn suite_filter_comes_from_the_environment(workspace: RunnerWorkspace) {
    let stdout = stdout_of(
        runner(&workspace)
            .arg("--dry-run")
            .env("SOAP_SUITE_RUNNER_SUITES", "[Beta]"),
    );
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("-sBeta"));
}

#[rstest]
fn settings_file_is_picked_up_from_the_working_directory(workspace: RunnerWorkspace) {
    workspace
        .write("conf/other.properties", RUNNER_PROPERTIES)
        .expect("write relocated properties");
    workspace
        .write(
            "soap-suite-runner.toml",
            "properties = \"conf/other.properties\"\nsuites = [\"Alpha\"]\n",
        )
        .expect("write settings");

    let stdout = stdout_of(runner(&workspace).arg("--dry-run"));
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("conf/project.xml"), "unexpected output: {stdout}");
}

#[rstest]
fn skip_run_aggregates_existing_results(workspace: RunnerWorkspace) {
    workspace
        .write_result("reports", "Alpha", &suite_xml("Alpha", &[Case::Pass("ping")]))
        .expect("alpha results");
    workspace
        .write_result(
            "reports",
            "Beta",
            &suite_xml("Beta", &[Case::Fail("pong", "no reply")]),
        )
        .expect("beta results");

    let stdout = stdout_of(runner(&workspace).arg("--skip-run"));
    assert!(stdout.contains("2 suites, 2 tests, 1 failures, 0 errors, 0 skipped"));
    assert!(stdout.contains("report.html"));
    let html = workspace.read("reports/report.html").expect("html report");
    assert!(html.contains("no reply"));
}

#[rstest]
fn suite_failures_fail_the_process_when_requested(workspace: RunnerWorkspace) {
    workspace
        .write_result(
            "reports",
            "Alpha",
            &suite_xml("Alpha", &[Case::Error("ping", "timeout")]),
        )
        .expect("alpha results");

    runner(&workspace)
        .args(["--skip-run", "--fail-on-suite-failure", "--suite", "Alpha"])
        .assert()
        .failure();
    runner(&workspace)
        .args(["--skip-run", "--suite", "Alpha"])
        .assert()
        .success();
}

#[rstest]
#[case(&["--suite", "Gamma", "--dry-run"], "Gamma")]
#[case(&["--properties", "missing.properties"], "missing.properties")]
#[case(&["--config", "absent.toml"], "absent.toml")]
fn configuration_errors_are_reported(
    workspace: RunnerWorkspace,
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    let output = runner(&workspace)
        .args(args)
        .output()
        .expect("command should execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(expected), "stderr was: {stderr}");
}

#[cfg(unix)]
#[rstest]
fn full_run_invokes_the_runner(workspace: RunnerWorkspace) {
    let runner_dir = workspace.install_fake_runner("bin").expect("install runner");
    workspace
        .write_runner_properties(&RUNNER_PROPERTIES.replace("/opt/soapui/bin", runner_dir.as_str()))
        .expect("rewrite runner properties");

    let stdout = stdout_of(&mut runner(&workspace));
    assert!(stdout.contains("Alpha"));
    assert!(stdout.contains("2 suites, 2 tests, 0 failures, 0 errors, 0 skipped"));
    let log = workspace.read("soap-suite-runner.log").expect("runner log");
    assert!(log.contains("fake runner: Beta against unset"));
}
