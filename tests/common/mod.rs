// tests/common/mod.rs
//! 共通テストユーティリティ

use serde_json::{Value, json};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// JSON 入力ファイルを置く一時ディレクトリ
pub struct SalesFile {
    _dir: TempDir,
    path: PathBuf,
}

impl SalesFile {
    pub fn new(records: &Value) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.json");
        fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
        Self { _dir: dir, path }
    }

    pub fn raw(contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.json");
        fs::write(&path, contents).unwrap();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

pub fn record(dept: &str, month: &str, date: &str, amount: f64, quantity: u32) -> Value {
    json!({ "dept": dept, "month": month, "date": date, "amount": amount, "quantity": quantity })
}

/// 部門が途中で再出現する並び
#[allow(dead_code)]
pub fn unsorted() -> Value {
    Value::Array(vec![
        record("開発部", "2024年02月", "2024-02-15", 110_000.0, 8),
        record("営業部", "2024年01月", "2024-01-05", 120_000.0, 10),
        record("開発部", "2024年01月", "2024-01-10", 95_000.0, 5),
    ])
}

#[allow(dead_code)]
pub fn grouped() -> Value {
    Value::Array(vec![
        record("部門A", "2024年01月", "2024-01-01", 0.0, 0),
        record("部門A", "2024年01月", "2024-01-02", 100.0, 1),
        record("部門B", "2024年01月", "2024-01-01", 200.0, 2),
        record("部門B", "2024年01月", "2024-01-02", 0.0, 0),
        record("部門C", "2024年01月", "2024-01-01", -100.0, 1),
        record("部門C", "2024年01月", "2024-01-02", 300.0, 3),
    ])
}
