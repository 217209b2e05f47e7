//! Behavioural coverage for the suite pipeline.
//!
//! The scenarios launch a fake runner script, so they only run on Unix.
#![cfg(unix)]

mod fixtures;
mod scenarios;
mod steps;
