// src/report.rs
//! Department → month sales report built on the control-break engine.
use crate::records::SalesRecord;
use control_break_engine::{Accumulator, BreakProcessor, Level, Result, parallel};
use hashbrown::HashMap;
use serde::Serialize;
use std::cell::RefCell;
use std::sync::Mutex;
use tracing::{debug, trace};

/// 月ごとの集計値
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub total_amount: f64,
    pub total_quantity: u64,
    pub record_count: usize,
}

impl MonthlyStats {
    pub fn update(&mut self, record: &SalesRecord) {
        self.total_amount += record.amount;
        self.total_quantity += u64::from(record.quantity);
        self.record_count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average_amount(&self) -> f64 {
        if self.record_count == 0 {
            0.0
        } else {
            self.total_amount / self.record_count as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average_price(&self) -> f64 {
        if self.total_quantity == 0 {
            0.0
        } else {
            self.total_amount / self.total_quantity as f64
        }
    }
}

/// Amounts collected for median and standard deviation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedStats {
    amounts: Vec<f64>,
}

impl DetailedStats {
    pub fn add(&mut self, amount: f64) {
        self.amounts.push(amount);
    }

    /// Appends `other`, keeping the amounts sorted so results do not depend on merge order.
    pub fn merge(&mut self, other: Self) {
        self.amounts.extend(other.amounts);
        self.amounts.sort_by(f64::total_cmp);
    }

    pub fn median(&self) -> f64 {
        let mut sorted = self.amounts.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        match n {
            0 => 0.0,
            _ if n % 2 == 0 => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
            _ => sorted[n / 2],
        }
    }

    /// Population standard deviation; 0 for fewer than two amounts.
    #[allow(clippy::cast_precision_loss)]
    pub fn standard_deviation(&self) -> f64 {
        if self.amounts.len() < 2 {
            return 0.0;
        }
        let n = self.amounts.len() as f64;
        let mean = self.amounts.iter().sum::<f64>() / n;
        let variance = self.amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: String,
    #[serde(flatten)]
    pub stats: MonthlyStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<SalesRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptReport {
    pub dept: String,
    pub total: Accumulator<f64>,
    pub months: Vec<MonthReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrandTotal {
    pub amount: f64,
    pub quantity: u64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptStatistics {
    pub dept: String,
    pub median: f64,
    pub standard_deviation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesReport {
    pub departments: Vec<DeptReport>,
    pub grand_total: GrandTotal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Vec<DeptStatistics>>,
}

/// Runs the two-level break over `records`, which must be grouped by
/// department and, within a department, by month.
///
/// With `details` every record is kept under its month.
///
/// # Errors
///
/// Contiguity and key errors from the engine.
pub fn build(records: &[SalesRecord], details: bool) -> Result<SalesReport> {
    let departments: RefCell<Vec<DeptReport>> = RefCell::new(Vec::new());
    let grand_total = RefCell::new(GrandTotal::default());

    let processor = BreakProcessor::builder()
        .level(
            Level::new(|r: &SalesRecord| r.dept.clone())
                .named("dept")
                .on_start(|dept| {
                    trace!("department {dept}");
                    departments.borrow_mut().push(DeptReport {
                        dept: dept.clone(),
                        total: Accumulator::default(),
                        months: Vec::new(),
                    });
                })
                .memo(Accumulator::<f64>::default, |total: &mut Accumulator<f64>, r: &SalesRecord| {
                    *total += r.amount;
                })
                .on_end(|_, total| {
                    if let Some(dept) = departments.borrow_mut().last_mut() {
                        dept.total = total.unwrap_or_default();
                    }
                }),
        )
        .level(
            Level::new(|r: &SalesRecord| r.month.clone())
                .named("month")
                .on_start(|month| {
                    if let Some(dept) = departments.borrow_mut().last_mut() {
                        dept.months.push(MonthReport {
                            month: month.clone(),
                            stats: MonthlyStats::default(),
                            records: Vec::new(),
                        });
                    }
                })
                .memo(MonthlyStats::default, |stats: &mut MonthlyStats, r: &SalesRecord| stats.update(r))
                .on_end(|_, stats| {
                    if let Some(month) = departments.borrow_mut().last_mut().and_then(|d| d.months.last_mut()) {
                        month.stats = stats.unwrap_or_default();
                    }
                }),
        )
        .detail(|r: &SalesRecord| {
            if details
                && let Some(month) = departments.borrow_mut().last_mut().and_then(|d| d.months.last_mut())
            {
                month.records.push(r.clone());
            }
        })
        .grand_total(|all: &[SalesRecord]| {
            let mut total = grand_total.borrow_mut();
            total.amount = all.iter().map(|r| r.amount).sum();
            total.quantity = all.iter().map(|r| u64::from(r.quantity)).sum();
            total.records = all.len();
        })
        .build()?;

    processor.process(records)?;
    drop(processor);

    let departments = departments.into_inner();
    debug!("report built: {} departments, {} records", departments.len(), records.len());
    Ok(SalesReport {
        departments,
        grand_total: grand_total.into_inner(),
        statistics: None,
    })
}

/// Per-department median and standard deviation of amounts.
///
/// Chunks are processed on `jobs` workers (0 = one per CPU). A department
/// cut by a chunk boundary yields partial amount lists that are merged
/// afterwards, so the result does not depend on the chunking. Grouping is
/// only checked per chunk; run [`build`] first to validate the whole input.
///
/// # Errors
///
/// Contiguity and key errors from the engine.
pub fn statistics(records: &[SalesRecord], jobs: usize) -> Result<Vec<DeptStatistics>> {
    let partials: Mutex<Vec<(String, DetailedStats)>> = Mutex::new(Vec::new());

    parallel::process_chunked(records, jobs, || {
        BreakProcessor::builder()
            .level(
                Level::new(|r: &SalesRecord| r.dept.clone())
                    .named("dept")
                    .memo(DetailedStats::default, |stats: &mut DetailedStats, r: &SalesRecord| {
                        stats.add(r.amount);
                    })
                    .on_end(|dept, stats| {
                        if let Ok(mut partials) = partials.lock() {
                            partials.push((dept, stats.unwrap_or_default()));
                        }
                    }),
            )
            .build()
    })?;

    let mut merged: HashMap<String, DetailedStats> = HashMap::new();
    for (dept, stats) in partials.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner) {
        merged.entry(dept).or_default().merge(stats);
    }

    let mut order: Vec<&str> = records.iter().map(|r| r.dept.as_str()).collect();
    order.dedup();
    Ok(order
        .into_iter()
        .filter_map(|dept| {
            merged.get(dept).map(|stats| DeptStatistics {
                dept: dept.to_owned(),
                median: stats.median(),
                standard_deviation: stats.standard_deviation(),
            })
        })
        .collect())
}
