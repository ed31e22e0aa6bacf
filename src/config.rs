// src/config.rs
use crate::args::Args;
use crate::options::{InputSource, OutputFormat};
use anyhow::{Context, Result};
use derive_builder::Builder;

/// Seed used by `--generate` when `--seed` is omitted.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ReportConfig {
    #[builder(default)]
    pub source: InputSource,
    #[builder(default)]
    pub sort: bool,
    #[builder(default = "OutputFormat::Table")]
    pub format: OutputFormat,
    #[builder(default)]
    pub details: bool,
    #[builder(default)]
    pub stats: bool,
    /// Worker count for the statistics pass; 0 means one per CPU.
    #[builder(default)]
    pub jobs: usize,
    #[builder(default)]
    pub verbose: bool,
}

impl TryFrom<Args> for ReportConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        let source = match (args.input, args.generate) {
            (Some(path), _) => InputSource::File(path),
            (None, Some(count)) => InputSource::Generated {
                count,
                seed: args.seed.unwrap_or(DEFAULT_SEED),
            },
            (None, None) => InputSource::Sample,
        };

        ReportConfigBuilder::default()
            .source(source)
            .sort(args.sort)
            .format(args.format)
            .details(args.details)
            .stats(args.stats)
            .jobs(args.jobs.unwrap_or(0))
            .verbose(args.verbose)
            .build()
            .context("invalid report configuration")
    }
}
