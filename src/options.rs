// src/options.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 部門・月ごとのテキストレポート
    #[default]
    Table,
    Json,
}

/// 売上データの入手元
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputSource {
    /// 組み込みのサンプルデータ
    #[default]
    Sample,
    /// JSON ファイル
    File(PathBuf),
    /// 乱数で生成したデータ
    Generated { count: usize, seed: u64 },
}
