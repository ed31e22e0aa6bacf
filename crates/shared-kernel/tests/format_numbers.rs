// crates/shared-kernel/tests/format_numbers.rs
use control_break_shared_kernel::{format_currency, format_number};

#[test]
fn currency_rounds_to_whole_units() {
    assert_eq!(format_currency(Some(120_000.0)), "120,000円");
    assert_eq!(format_currency(Some(1_234.5)), "1,235円");
    assert_eq!(format_currency(Some(-100.0)), "-100円");
}

#[test]
fn currency_missing_is_zero() {
    assert_eq!(format_currency(None), "0円");
}

#[test]
fn number_accepts_any_integer_type() {
    assert_eq!(format_number(Some(1_000_000u64)), "1,000,000");
    assert_eq!(format_number(Some(42i32)), "42");
    assert_eq!(format_number(None::<usize>), "0");
}

#[test]
fn currency_beyond_i64_is_not_zero() {
    assert_eq!(format_currency(Some(1e19)), "10,000,000,000,000,000,000円");
    assert_eq!(format_currency(Some(-1e19)), "-10,000,000,000,000,000,000円");
    assert_eq!(format_currency(Some(f64::INFINITY)), "170,141,183,460,469,231,731,687,303,715,884,105,727円");
}

#[test]
fn number_keeps_full_u64_range() {
    assert_eq!(format_number(Some(u64::MAX)), "18,446,744,073,709,551,615");
}
