//! Binds the pipeline feature files to their steps.

use super::fixtures::{PipelineState, pipeline_state};
use rstest_bdd_macros::scenario;

#[scenario(path = "tests/features/run_suites.feature")]
fn mixed_suite_outcomes(pipeline_state: PipelineState) {
    let _ = pipeline_state;
}

#[scenario(path = "tests/features/skip_run.feature")]
fn skipping_execution(pipeline_state: PipelineState) {
    let _ = pipeline_state;
}
