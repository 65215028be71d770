//! Display formatting pinned to the Swedish (`sv-SE`) locale.
//!
//! Amounts are calculated as plain `f64` and only rounded here, using
//! decimal half-up rounding so that values such as `2.675` round the way a
//! person reading the number expects.
//!
//! | Function | Example output |
//! |----------|----------------|
//! | [`format_currency`] | `1 234 kr`, `1 234,50 kr` |
//! | [`format_percentage`] | `3,50 %` |
//! | [`format_number`] | `1 234 568` |
//! | [`format_compact_currency`] | `999`, `1.0k`, `250k`, `1.2m` |
//! | [`format_debt_ratio`] | `4.2x` |
//!
//! Group separators and the space before units are non-breaking spaces
//! (U+00A0); negative numbers use the minus sign U+2212.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::calculations::common::finite_or_zero;

pub const NBSP: char = '\u{a0}';
pub const MINUS_SIGN: char = '\u{2212}';
pub const CURRENCY_UNIT: &str = "kr";
pub const DECIMAL_SEPARATOR: char = ',';

/// Shown in place of a value that is missing or not a finite number.
pub const NO_VALUE: &str = "—";

/// Rounds to `dp` decimal places, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use budget_core::format::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_up(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_half_up(dec!(-2.5), 0), dec!(-3));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `None` when a finite value lies outside the range `Decimal` can hold.
fn to_decimal(value: f64) -> Option<Decimal> {
    let value = finite_or_zero(value);
    // Display gives the shortest string that round-trips, so 2.675 stays 2.675.
    let decimal = value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value));
    if decimal.is_none() {
        warn!(%value, "amount out of displayable range");
    }
    decimal
}

/// Rounds and renders `value` with `dp` decimals, grouped in threes.
fn format_grouped(
    value: f64,
    dp: u32,
) -> Option<String> {
    let mut rounded = round_half_up(to_decimal(value)?, dp);
    rounded.rescale(dp);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push(MINUS_SIGN);
    }
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    Some(out)
}

/// Formats a currency amount, e.g. `1 234 kr` or `1 234,50 kr`.
///
/// Without decimals the amount is rounded to whole kronor. Non-finite
/// amounts render as zero; amounts too large to display render as
/// [`NO_VALUE`].
pub fn format_currency(
    value: f64,
    with_decimals: bool,
) -> String {
    let dp = if with_decimals { 2 } else { 0 };
    format_grouped(value, dp).map_or_else(
        || NO_VALUE.to_string(),
        |amount| format!("{amount}{NBSP}{CURRENCY_UNIT}"),
    )
}

/// Formats a value already expressed in percent, e.g. `3.5` → `3,50 %`.
///
/// `decimals` is clamped to 1 or 2.
pub fn format_percentage(
    value: f64,
    decimals: u32,
) -> String {
    format_grouped(value, decimals.clamp(1, 2))
        .map_or_else(|| NO_VALUE.to_string(), |percent| format!("{percent}{NBSP}%"))
}

/// Formats a whole number with digit grouping, e.g. `1 234 568`.
pub fn format_number(value: f64) -> String {
    format_grouped(value, 0).unwrap_or_else(|| NO_VALUE.to_string())
}

/// Short currency label for chart axes and tight tables.
///
/// Below 1 000 the whole amount is shown; from 1 000 thousands are shown
/// with one decimal (`1.0k`), from 10 000 without (`250k`), and from
/// 1 000 000 millions with one decimal (`1.2m`). The two thousand buckets
/// are picked from the rounded value, so 999.7 gives `1.0k` and 9 999.97
/// gives `10k`.
pub fn format_compact_currency(value: f64) -> String {
    let value = finite_or_zero(value);
    let magnitude = value.abs();
    if magnitude < 0.5 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if magnitude >= 1_000_000.0 {
        format!("{sign}{:.1}m", magnitude / 1_000_000.0)
    } else if (magnitude / 100.0).round() >= 100.0 {
        format!("{sign}{:.0}k", magnitude / 1_000.0)
    } else if magnitude.round() >= 1_000.0 {
        format!("{sign}{:.1}k", magnitude / 1_000.0)
    } else {
        format!("{sign}{magnitude:.0}")
    }
}

/// Formats a debt-to-income multiple, e.g. `4.2x`.
pub fn format_debt_ratio(ratio: Option<f64>) -> String {
    display_or_placeholder(ratio, |r| format!("{r:.1}x"))
}

/// Passes finite numbers through and maps everything else to `None`.
pub fn safe_display(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Formats `value` with `format` when it is a finite number, otherwise
/// returns [`NO_VALUE`].
pub fn display_or_placeholder<F>(
    value: Option<f64>,
    format: F,
) -> String
where
    F: FnOnce(f64) -> String,
{
    safe_display(value).map_or_else(|| NO_VALUE.to_string(), format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(0.5), 0), dec!(1));
        assert_eq!(round_half_up(dec!(-0.5), 0), dec!(-1));
        assert_eq!(round_half_up(dec!(2.675), 2), dec!(2.68));
    }

    // =========================================================================
    // currency
    // =========================================================================

    #[test]
    fn currency_rounds_to_whole_kronor() {
        assert_eq!(format_currency(1_234.5, false), "1\u{a0}235\u{a0}kr");
        assert_eq!(format_currency(4_583.333, false), "4\u{a0}583\u{a0}kr");
    }

    #[test]
    fn currency_with_decimals_uses_comma() {
        assert_eq!(format_currency(1_234.5, true), "1\u{a0}234,50\u{a0}kr");
        assert_eq!(format_currency(2.675, true), "2,68\u{a0}kr");
    }

    #[test]
    fn currency_groups_millions() {
        assert_eq!(format_currency(1_000_000.0, false), "1\u{a0}000\u{a0}000\u{a0}kr");
        assert_eq!(format_currency(999.5, false), "1\u{a0}000\u{a0}kr");
    }

    #[test]
    fn currency_small_amounts_have_no_group_separator() {
        assert_eq!(format_currency(999.0, false), "999\u{a0}kr");
        assert_eq!(format_currency(0.0, false), "0\u{a0}kr");
    }

    #[test]
    fn currency_negative_uses_minus_sign() {
        assert_eq!(format_currency(-2_500.0, false), "\u{2212}2\u{a0}500\u{a0}kr");
    }

    #[test]
    fn currency_negative_rounding_to_zero_drops_sign() {
        assert_eq!(format_currency(-0.4, false), "0\u{a0}kr");
    }

    #[test]
    fn currency_non_finite_renders_zero() {
        assert_eq!(format_currency(f64::NAN, false), "0\u{a0}kr");
        assert_eq!(format_currency(f64::INFINITY, true), "0,00\u{a0}kr");
    }

    #[test]
    fn amounts_beyond_decimal_range_render_placeholder() {
        assert_eq!(format_currency(1e30, false), NO_VALUE);
        assert_eq!(format_currency(-1e30, true), NO_VALUE);
        assert_eq!(format_number(1e30), NO_VALUE);
        assert_eq!(format_percentage(1e30, 2), NO_VALUE);
    }

    // =========================================================================
    // percentage and number
    // =========================================================================

    #[test]
    fn percentage_uses_fixed_decimals() {
        assert_eq!(format_percentage(3.5, 2), "3,50\u{a0}%");
        assert_eq!(format_percentage(3.5, 1), "3,5\u{a0}%");
        assert_eq!(format_percentage(4.0, 1), "4,0\u{a0}%");
    }

    #[test]
    fn percentage_clamps_decimals() {
        assert_eq!(format_percentage(3.456, 5), "3,46\u{a0}%");
        assert_eq!(format_percentage(3.0, 0), "3,0\u{a0}%");
    }

    #[test]
    fn number_groups_thousands() {
        assert_eq!(format_number(1_234_567.8), "1\u{a0}234\u{a0}568");
        assert_eq!(format_number(12.0), "12");
    }

    // =========================================================================
    // compact currency
    // =========================================================================

    #[test]
    fn compact_currency_thresholds() {
        assert_eq!(format_compact_currency(999.0), "999");
        assert_eq!(format_compact_currency(1_000.0), "1.0k");
        assert_eq!(format_compact_currency(999_999.0), "1000k");
        assert_eq!(format_compact_currency(1_000_000.0), "1.0m");
    }

    #[test]
    fn compact_currency_buckets_follow_rounded_value() {
        assert_eq!(format_compact_currency(999.4), "999");
        assert_eq!(format_compact_currency(999.7), "1.0k");
        assert_eq!(format_compact_currency(9_949.0), "9.9k");
        assert_eq!(format_compact_currency(9_999.97), "10k");
        assert_eq!(format_compact_currency(-999.7), "-1.0k");
    }

    #[test]
    fn compact_currency_mid_ranges() {
        assert_eq!(format_compact_currency(2_500.0), "2.5k");
        assert_eq!(format_compact_currency(250_000.0), "250k");
        assert_eq!(format_compact_currency(3_260_000.0), "3.3m");
    }

    #[test]
    fn compact_currency_negative_and_zero() {
        assert_eq!(format_compact_currency(-1_500.0), "-1.5k");
        assert_eq!(format_compact_currency(0.0), "0");
        assert_eq!(format_compact_currency(-0.2), "0");
        assert_eq!(format_compact_currency(f64::NAN), "0");
    }

    // =========================================================================
    // ratio and safe_display
    // =========================================================================

    #[test]
    fn debt_ratio_has_one_decimal() {
        assert_eq!(format_debt_ratio(Some(4.24)), "4.2x");
        assert_eq!(format_debt_ratio(Some(3.0)), "3.0x");
    }

    #[test]
    fn debt_ratio_without_value_is_placeholder() {
        assert_eq!(format_debt_ratio(None), NO_VALUE);
        assert_eq!(format_debt_ratio(Some(f64::INFINITY)), NO_VALUE);
    }

    #[test]
    fn safe_display_rejects_non_finite_values() {
        assert_eq!(safe_display(Some(f64::INFINITY)), None);
        assert_eq!(safe_display(Some(f64::NEG_INFINITY)), None);
        assert_eq!(safe_display(Some(f64::NAN)), None);
        assert_eq!(safe_display(None), None);
    }

    #[test]
    fn safe_display_passes_finite_values_unchanged() {
        assert_eq!(safe_display(Some(0.0)), Some(0.0));
        assert_eq!(safe_display(Some(-12.75)), Some(-12.75));
        assert_eq!(safe_display(Some(f64::MAX)), Some(f64::MAX));
    }
}
