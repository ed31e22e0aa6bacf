// crates/shared-kernel/src/format.rs
//! Number rendering helpers used by report output.

use num_traits::ToPrimitive;

pub const CURRENCY_SUFFIX: &str = "円";

/// Formats an amount rounded to whole units with thousands separators, e.g. `1,234円`.
///
/// Amounts beyond the `i128` range saturate at its bounds; NaN renders as `0円`.
pub fn format_currency(amount: Option<f64>) -> String {
    let units = amount.map_or(0, whole_units);
    format!("{}{CURRENCY_SUFFIX}", group_thousands(units))
}

/// Formats any integer-like number with thousands separators; missing values render as `0`.
pub fn format_number<N: ToPrimitive>(number: Option<N>) -> String {
    group_thousands(number.and_then(|n| n.to_i128()).unwrap_or(0))
}

fn whole_units(amount: f64) -> i128 {
    let rounded = amount.round();
    rounded.to_i128().unwrap_or(if rounded.is_nan() {
        0
    } else if rounded.is_sign_negative() {
        i128::MIN
    } else {
        i128::MAX
    })
}

fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn extremes_do_not_overflow() {
        assert_eq!(group_thousands(i128::from(i64::MIN)), "-9,223,372,036,854,775,808");
        assert_eq!(group_thousands(i128::MIN), "-170,141,183,460,469,231,731,687,303,715,884,105,728");
    }

    #[test]
    fn out_of_range_amounts_saturate() {
        assert_eq!(whole_units(1e30), 1_000_000_000_000_000_019_884_624_838_656);
        assert_eq!(whole_units(f64::MAX), i128::MAX);
        assert_eq!(whole_units(f64::NEG_INFINITY), i128::MIN);
        assert_eq!(whole_units(f64::NAN), 0);
    }
}
