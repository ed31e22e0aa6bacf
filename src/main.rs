// src/main.rs
use anyhow::{Result, anyhow};
use clap::Parser;
use control_break::args::Args;
use control_break::config::ReportConfig;
use control_break::{app, presentation};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let result = ReportConfig::try_from(args).and_then(|config| {
        init_logging(config.verbose)?;
        app::run(&config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            presentation::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}
