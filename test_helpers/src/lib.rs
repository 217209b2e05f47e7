//! Test helpers shared across crates in the workspace.
//!
//! [`workspace`] lays out runner properties, suite overrides, result files,
//! and fake runner scripts in a temporary directory. [`crate::figment`] wraps
//! `figment::Jail` for settings tests that touch the environment.

pub mod figment;
pub mod junit;
pub mod workspace;

pub use workspace::RunnerWorkspace;
