// src/sample.rs
use crate::records::{SalesRecord, sort_for_report};
use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng};

const DEPARTMENTS: [&str; 5] = ["営業部", "開発部", "マーケティング部", "管理部", "人事部"];

/// 組み込みのサンプルデータ（部門・月ごとにまとまった状態）
pub fn sales_data() -> Vec<SalesRecord> {
    const ROWS: [(&str, u32, u32, f64, u32); 11] = [
        ("営業部", 4, 1, 120_000.0, 10),
        ("営業部", 4, 15, 85_000.0, 7),
        ("営業部", 5, 2, 156_000.0, 12),
        ("営業部", 5, 10, 98_000.0, 8),
        ("開発部", 4, 10, 95_000.0, 5),
        ("開発部", 4, 20, 78_000.0, 6),
        ("開発部", 5, 20, 110_000.0, 8),
        ("開発部", 5, 25, 125_000.0, 10),
        ("マーケティング部", 4, 5, 65_000.0, 15),
        ("マーケティング部", 4, 25, 72_000.0, 18),
        ("マーケティング部", 5, 15, 88_000.0, 20),
    ];

    ROWS.iter()
        .filter_map(|&(dept, month, day, amount, quantity)| {
            let date = NaiveDate::from_ymd_opt(2024, month, day)?;
            Some(SalesRecord::new(dept, &month_label(month), date, amount, quantity))
        })
        .collect()
}

/// Deterministic synthetic data set, already sorted for reporting.
pub fn generate(count: usize, seed: u64) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records: Vec<SalesRecord> = (0..count)
        .filter_map(|_| {
            let dept = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
            let month = rng.gen_range(1..=6);
            let day = rng.gen_range(1..29);
            let (low, high) = amount_range(dept);
            let amount = rng.gen_range(low..high);
            let quantity = rng.gen_range(1..50);
            let date = NaiveDate::from_ymd_opt(2024, month, day)?;
            Some(SalesRecord::new(dept, &month_label(month), date, amount, quantity))
        })
        .collect();
    sort_for_report(&mut records);
    records
}

fn month_label(month: u32) -> String {
    format!("2024年{month:02}月")
}

fn amount_range(dept: &str) -> (f64, f64) {
    match dept {
        "営業部" => (50_000.0, 200_000.0),
        "開発部" => (60_000.0, 150_000.0),
        "マーケティング部" => (40_000.0, 120_000.0),
        "管理部" => (30_000.0, 100_000.0),
        "人事部" => (20_000.0, 80_000.0),
        _ => (10_000.0, 50_000.0),
    }
}
