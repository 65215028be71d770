//! Numeric helpers shared by the calculation modules.

use tracing::debug;

/// Returns `value` when it is finite, otherwise zero.
///
/// # Examples
///
/// ```
/// use budget_core::calculations::common::finite_or_zero;
///
/// assert_eq!(finite_or_zero(12.5), 12.5);
/// assert_eq!(finite_or_zero(f64::NAN), 0.0);
/// assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
/// ```
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!(%value, "coalescing non-finite amount to zero");
        0.0
    }
}

/// Like [`finite_or_zero`], but also maps negative values to zero.
///
/// Used for inputs that are defined as non-negative amounts.
pub fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}
