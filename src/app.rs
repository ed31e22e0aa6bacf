// src/app.rs
use crate::config::ReportConfig;
use crate::options::InputSource;
use crate::{presentation, records, report, sample};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Loads the records, builds the report and prints it to stdout.
pub fn run(config: &ReportConfig) -> Result<()> {
    let mut records = match &config.source {
        InputSource::Sample => sample::sales_data(),
        InputSource::File(path) => records::load_json(path)?,
        InputSource::Generated { count, seed } => sample::generate(*count, *seed),
    };
    info!("{} records loaded from {:?}", records.len(), config.source);

    if config.sort {
        records::sort_for_report(&mut records);
        debug!("records sorted by dept, month, date");
    }

    let mut sales = report::build(&records, config.details).context("failed to build sales report")?;
    if config.stats {
        sales.statistics = Some(report::statistics(&records, config.jobs).context("failed to compute statistics")?);
    }

    print!("{}", presentation::render(&sales, config)?);
    Ok(())
}
