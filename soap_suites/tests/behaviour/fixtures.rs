//! Scenario state shared between pipeline steps.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use soap_suites::PipelineSummary;
use test_helpers::RunnerWorkspace;

/// Directory inside the workspace holding the fake runner.
pub const RUNNER_DIR: &str = "bin";

/// Workspace and pipeline results carried through a scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct PipelineState {
    pub workspace: Slot<RunnerWorkspace>,
    pub summary: Slot<PipelineSummary>,
}

/// Starts each scenario without a workspace or results.
#[fixture]
pub fn pipeline_state() -> PipelineState {
    PipelineState::default()
}
