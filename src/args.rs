// src/args.rs
use crate::options::OutputFormat;
use crate::parsers;
use clap::{Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "control_break",
    version,
    about = "部門・月別の売上コントロールブレイクレポート",
    group(
        clap::ArgGroup::new("input_source")
            .args(["input", "generate"])
            .multiple(false)
    )
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// 売上データの JSON ファイル（省略時は組み込みサンプル）
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "入力")]
    pub input: Option<PathBuf>,

    /// 指定件数の合成データを使用
    #[arg(long, value_parser = parsers::parse_positive_usize, help_heading = "入力")]
    pub generate: Option<usize>,

    /// 合成データの乱数シード
    #[arg(long, help_heading = "入力")]
    pub seed: Option<u64>,

    /// 処理前に部門・月・日付で並べ替え
    #[arg(long, help_heading = "入力")]
    pub sort: bool,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "table", help_heading = "出力")]
    pub format: OutputFormat,

    /// 明細行を表示
    #[arg(long, help_heading = "出力")]
    pub details: bool,

    /// 部門ごとの中央値・標準偏差を表示
    #[arg(long, help_heading = "出力")]
    pub stats: bool,

    /// 統計処理の並列数（0 = CPU 数）
    #[arg(long, short = 'j', value_parser = parsers::parse_jobs, help_heading = "動作")]
    pub jobs: Option<usize>,

    /// 詳細ログを出力
    #[arg(long, short = 'v', help_heading = "動作")]
    pub verbose: bool,
}
