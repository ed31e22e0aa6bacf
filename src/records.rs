// src/records.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 売上明細 1 件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub dept: String,
    pub month: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub quantity: u32,
}

impl SalesRecord {
    pub fn new(dept: &str, month: &str, date: NaiveDate, amount: f64, quantity: u32) -> Self {
        Self {
            dept: dept.to_owned(),
            month: month.to_owned(),
            date,
            amount,
            quantity,
        }
    }
}

/// Reads a JSON array of records.
pub fn load_json(path: &Path) -> Result<Vec<SalesRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// 部門 → 月 → 日付の順に並べ替える
pub fn sort_for_report(records: &mut [SalesRecord]) {
    records.sort_by(|a, b| {
        a.dept
            .cmp(&b.dept)
            .then_with(|| a.month.cmp(&b.month))
            .then_with(|| a.date.cmp(&b.date))
    });
}
