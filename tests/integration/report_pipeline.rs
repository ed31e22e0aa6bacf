// tests/integration/report_pipeline.rs
use crate::common::{SalesFile, grouped, unsorted};
use control_break::config::ReportConfigBuilder;
use control_break::options::OutputFormat;
use control_break::{presentation, records, report, sample};
use control_break_engine::ControlBreakError;

#[test]
fn loads_and_reports_json_file() {
    let file = SalesFile::new(&grouped());
    let data = records::load_json(file.path()).unwrap();
    let sales = report::build(&data, false).unwrap();

    let totals: Vec<f64> = sales.departments.iter().map(|d| *d.total.value()).collect();
    assert_eq!(totals, vec![100.0, 200.0, 200.0]);
    assert_eq!(sales.grand_total.quantity, 7);
}

#[test]
fn unsorted_file_fails_with_engine_diagnostics() {
    let file = SalesFile::new(&unsorted());
    let data = records::load_json(file.path()).unwrap();

    match report::build(&data, false) {
        Err(ControlBreakError::Contiguity(violation)) => {
            assert_eq!(violation.record_index, 2);
            assert_eq!(violation.current_key, "\"開発部\"");
            assert_eq!(violation.previous_key, "\"営業部\"");
        }
        other => panic!("expected contiguity violation, got {other:?}"),
    }
}

#[test]
fn generated_data_balances() {
    let data = sample::generate(5_000, 42);
    let sales = report::build(&data, false).unwrap();

    let month_records: usize = sales
        .departments
        .iter()
        .flat_map(|d| &d.months)
        .map(|m| m.stats.record_count)
        .sum();
    assert_eq!(month_records, 5_000);

    let dept_sum: f64 = sales.departments.iter().map(|d| *d.total.value()).sum();
    assert!((dept_sum - sales.grand_total.amount).abs() < 1e-3);
}

#[test]
fn json_rendering_round_trips_through_serde_json() {
    let config = ReportConfigBuilder::default().format(OutputFormat::Json).details(true).build().unwrap();
    let sales = report::build(&sample::sales_data(), true).unwrap();
    let rendered = presentation::render(&sales, &config).unwrap();

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["departments"][2]["months"][1]["records"][0]["date"], "2024-05-15");
}
