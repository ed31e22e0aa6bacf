// src/presentation.rs
use crate::config::ReportConfig;
use crate::options::OutputFormat;
use crate::report::{DeptStatistics, SalesReport};
use anyhow::Result;
use control_break_engine::{ControlBreakError, format_currency, format_number};
use std::fmt;

const RULE: &str = "===============================";

/// Renders the report in the configured format.
pub fn render(report: &SalesReport, config: &ReportConfig) -> Result<String> {
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(TableView { report, details: config.details }.to_string()),
    }
}

/// Writes an error to stderr, with the engine's diagnostic report when available.
pub fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<ControlBreakError>() {
        Some(break_err) => {
            let context: Vec<_> = err.chain().take_while(|e| e.downcast_ref::<ControlBreakError>().is_none()).collect();
            for outer in context {
                eprintln!("Error: {outer}");
            }
            eprintln!("{}", break_err.report());
        }
        None => eprintln!("Error: {err:#}"),
    }
}

struct TableView<'a> {
    report: &'a SalesReport,
    details: bool,
}

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dept in &self.report.departments {
            writeln!(f, "【 {} 】", dept.dept)?;
            for month in &dept.months {
                writeln!(f, " ▼ {}", month.month)?;
                if self.details {
                    for record in &month.records {
                        writeln!(
                            f,
                            "    {}: {} ({}個)",
                            record.date,
                            format_currency(Some(record.amount)),
                            record.quantity
                        )?;
                    }
                }
                let stats = &month.stats;
                writeln!(f, "  売上合計: {}", format_currency(Some(stats.total_amount)))?;
                writeln!(f, "  販売数量: {}個", format_number(Some(stats.total_quantity)))?;
                writeln!(f, "  取引件数: {}件", format_number(Some(stats.record_count)))?;
                writeln!(f, "  平均売上: {}", format_currency(Some(stats.average_amount())))?;
                writeln!(f, "  平均単価: {}", format_currency(Some(stats.average_price())))?;
            }
            writeln!(f, "部門売上合計: {}", format_currency(Some(*dept.total.value())))?;
            writeln!(f)?;
        }

        let total = &self.report.grand_total;
        writeln!(f, "{RULE}")?;
        writeln!(f, "総売上: {}", format_currency(Some(total.amount)))?;
        writeln!(f, "総販売数: {}個", format_number(Some(total.quantity)))?;
        writeln!(f, "取引件数: {}件", format_number(Some(total.records)))?;
        writeln!(f, "{RULE}")?;

        if let Some(statistics) = &self.report.statistics {
            write_statistics(f, statistics)?;
        }
        Ok(())
    }
}

fn write_statistics(f: &mut fmt::Formatter<'_>, statistics: &[DeptStatistics]) -> fmt::Result {
    for stats in statistics {
        writeln!(f)?;
        writeln!(f, "【{} 統計情報】", stats.dept)?;
        writeln!(f, "  中央値: {}", format_currency(Some(stats.median)))?;
        writeln!(f, "  標準偏差: {}", format_currency(Some(stats.standard_deviation)))?;
    }
    Ok(())
}
