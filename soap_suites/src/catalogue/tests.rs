//! Unit tests for suite assembly.

use super::*;
use rstest::{fixture, rstest};
use test_helpers::RunnerWorkspace;

const RUNNER: &str = concat!(
    "soapui.test-suites = Alpha; Beta ;;Alpha\n",
    "soapui.report.dir = reports\n",
    "soapui.project = project.xml\n",
    "soapui.testrunner.path = /opt/soapui/bin\n",
    "endpoint = http://shared\n",
);

#[fixture]
fn workspace() -> RunnerWorkspace {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace
        .write_runner_properties(RUNNER)
        .expect("write runner properties");
    workspace
        .write_suite_overrides("Alpha", "endpoint = http://alpha\nsoapui.testrunner.args = -r\n")
        .expect("write overrides");
    workspace
}

#[rstest]
fn assemble_keeps_declaration_order_without_repeats(workspace: RunnerWorkspace) {
    let catalogue = SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    let names: Vec<_> = catalogue.suites().iter().map(SuiteDescriptor::name).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
}

#[rstest]
fn overrides_shadow_runner_properties(workspace: RunnerWorkspace) {
    let catalogue = SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    let [alpha, beta] = catalogue.suites() else {
        panic!("expected two suites");
    };
    assert_eq!(alpha.properties().get("endpoint").as_deref(), Some("http://alpha"));
    assert_eq!(alpha.runner_flags(), ["-r"]);
    assert_eq!(beta.properties().get("endpoint").as_deref(), Some("http://shared"));
    assert_eq!(beta.runner_flags(), ["-r", "-a", "-j", "-I"]);
    assert!(beta.properties().layers().first().is_some_and(|layer| layer.properties().is_empty()));
}

#[rstest]
fn relative_paths_resolve_against_the_runner_properties(workspace: RunnerWorkspace) {
    let catalogue = SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    let settings = catalogue.settings();
    assert_eq!(settings.report_dir, workspace.path("reports"));
    assert_eq!(settings.suites_dir, workspace.root().to_path_buf());
    assert_eq!(settings.runner_log, workspace.path(keys::DEFAULT_RUNNER_LOG));
    assert_eq!(settings.report_title, keys::DEFAULT_REPORT_TITLE);

    let alpha = catalogue.suites().first().expect("alpha");
    assert_eq!(alpha.project_path().expect("project"), workspace.path("project.xml"));
    assert_eq!(alpha.runner_dir().expect("runner dir"), Utf8PathBuf::from("/opt/soapui/bin"));
    assert_eq!(alpha.report_dir().expect("report dir"), workspace.path("reports"));
    assert_eq!(alpha.result_file_name(), "TEST-Alpha.xml");
    assert_eq!(alpha.runner_script(), keys::DEFAULT_TESTRUNNER_SCRIPT);
    assert!(!alpha.inherit_env().expect("inherit env"));
}

#[rstest]
fn suites_dir_redirects_override_lookup() {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace
        .write_runner_properties(
            "soapui.test-suites=Alpha\nsoapui.report.dir=out\nsoapui.suites.dir=suites\n",
        )
        .expect("write runner properties");
    workspace
        .write("suites/Alpha.properties", "soapui.project=alpha.xml\n")
        .expect("write overrides");

    let catalogue = SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    let alpha = catalogue.suites().first().expect("alpha");
    assert_eq!(alpha.project_path().expect("project"), workspace.path("alpha.xml"));
    assert_eq!(
        alpha.properties().provenance_of(keys::PROJECT),
        Some(crate::layers::LayerProvenance::SuiteOverrides)
    );
}

#[rstest]
#[case("soapui.report.dir=out\n", "soapui.test-suites")]
#[case("soapui.test-suites=Alpha\n", "soapui.report.dir")]
fn missing_required_keys_are_reported(#[case] text: &str, #[case] expected_key: &str) {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace.write_runner_properties(text).expect("write");
    match SuiteCatalogue::assemble(&workspace.runner_properties()) {
        Err(SuitesError::MissingKey { key, .. }) => assert_eq!(key, expected_key),
        other => panic!("expected missing key, got {other:?}"),
    }
}

#[rstest]
fn blank_suite_list_is_rejected() {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    workspace
        .write_runner_properties("soapui.test-suites= ; ;\nsoapui.report.dir=out\n")
        .expect("write");
    assert!(matches!(
        SuiteCatalogue::assemble(&workspace.runner_properties()),
        Err(SuitesError::NoSuites(_))
    ));
}

#[rstest]
fn missing_runner_properties_is_an_io_error() {
    let workspace = RunnerWorkspace::new().expect("create workspace");
    assert!(matches!(
        SuiteCatalogue::assemble(&workspace.runner_properties()),
        Err(SuitesError::Io { .. })
    ));
}

#[rstest]
fn malformed_overrides_fail_assembly(workspace: RunnerWorkspace) {
    workspace
        .write_suite_overrides("Beta", "bad=\\u12\n")
        .expect("write overrides");
    assert!(matches!(
        SuiteCatalogue::assemble(&workspace.runner_properties()),
        Err(SuitesError::Properties { line: 1, .. })
    ));
}

#[rstest]
fn retain_filters_and_rejects_unknown_names(workspace: RunnerWorkspace) {
    let mut catalogue =
        SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    let err = catalogue
        .retain(&["Gamma".to_owned()])
        .expect_err("Gamma is not declared");
    assert!(matches!(err, SuitesError::UnknownSuite(name) if name == "Gamma"));
    assert_eq!(catalogue.suites().len(), 2);

    catalogue.retain(&[]).expect("empty keeps all");
    assert_eq!(catalogue.suites().len(), 2);

    catalogue.retain(&["Beta".to_owned()]).expect("retain Beta");
    let names: Vec<_> = catalogue.suites().iter().map(SuiteDescriptor::name).collect();
    assert_eq!(names, ["Beta"]);
}

#[rstest]
fn report_dir_override_applies_to_every_suite(workspace: RunnerWorkspace) {
    let mut catalogue =
        SuiteCatalogue::assemble(&workspace.runner_properties()).expect("assemble");
    catalogue.override_report_dir(Utf8Path::new("elsewhere"));
    assert_eq!(catalogue.settings().report_dir, workspace.path("elsewhere"));
    for suite in catalogue.suites() {
        assert_eq!(suite.report_dir().expect("report dir"), workspace.path("elsewhere"));
    }
}

#[rstest]
#[case("true", Some(true))]
#[case("FALSE", Some(false))]
#[case("yes", None)]
fn inherit_env_accepts_booleans_only(#[case] value: &str, #[case] expected: Option<bool>) {
    let mut layers = LayeredProperties::new();
    layers.push(PropertyLayer::runner_properties(
        [(keys::INHERIT_ENV, value)].into_iter().collect(),
        None,
    ));
    let suite = SuiteDescriptor::new("Alpha", layers, ".");
    assert_eq!(suite.inherit_env().ok(), expected);
}

#[rstest]
fn missing_project_names_the_suite() {
    let suite = SuiteDescriptor::new("Alpha", LayeredProperties::new(), ".");
    match suite.project_path() {
        Err(SuitesError::MissingKey { key, scope }) => {
            assert_eq!(key, keys::PROJECT);
            assert!(scope.contains("Alpha"));
        }
        other => panic!("expected missing key, got {other:?}"),
    }
}
