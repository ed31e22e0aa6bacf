// tests/integration/report_properties.rs
use chrono::NaiveDate;
use control_break::records::{SalesRecord, sort_for_report};
use control_break::report;
use proptest::prelude::*;

const DEPTS: [&str; 3] = ["営業部", "開発部", "人事部"];

fn sales() -> impl Strategy<Value = Vec<SalesRecord>> {
    prop::collection::vec((0usize..3, 1u32..=3, 1u32..=28, 0u32..500_000, 1u32..50), 0..80).prop_map(|rows| {
        rows.into_iter()
            .filter_map(|(dept, month, day, amount, quantity)| {
                let date = NaiveDate::from_ymd_opt(2024, month, day)?;
                let label = format!("2024年{month:02}月");
                Some(SalesRecord::new(DEPTS[dept], &label, date, f64::from(amount), quantity))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn sorted_sales_always_balance(mut data in sales()) {
        sort_for_report(&mut data);
        let sales = report::build(&data, false).unwrap();

        let mut depts: Vec<&str> = data.iter().map(|r| r.dept.as_str()).collect();
        depts.dedup();
        prop_assert_eq!(sales.departments.iter().map(|d| d.dept.as_str()).collect::<Vec<_>>(), depts);

        let amount: f64 = data.iter().map(|r| r.amount).sum();
        let dept_sum: f64 = sales.departments.iter().map(|d| *d.total.value()).sum();
        prop_assert_eq!(dept_sum, amount);
        prop_assert_eq!(sales.grand_total.amount, amount);
        prop_assert_eq!(sales.grand_total.records, data.len());

        let month_records: usize =
            sales.departments.iter().flat_map(|d| &d.months).map(|m| m.stats.record_count).sum();
        prop_assert_eq!(month_records, data.len());
    }

    #[test]
    fn details_reproduce_the_input(mut data in sales()) {
        sort_for_report(&mut data);
        let sales = report::build(&data, true).unwrap();

        let kept: Vec<&SalesRecord> =
            sales.departments.iter().flat_map(|d| &d.months).flat_map(|m| &m.records).collect();
        prop_assert_eq!(kept, data.iter().collect::<Vec<_>>());
    }
}
