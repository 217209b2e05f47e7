//! CLI entrypoint for `soap-suite-runner`.

use clap::Parser;
use soap_suite_runner::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    soap_suite_runner::run(&args).map_err(color_eyre::eyre::Report::from)
}
