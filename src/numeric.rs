//! Numeric helpers used by the selection formulas.

/// Value returned by [`safe_divide`] when the denominator is zero.
///
/// Scoring treats it as maximally attractive, which is what makes unvisited
/// nodes win selection.
pub const DIV_BY_ZERO: f64 = f64::INFINITY;

/// Divide, returning [`DIV_BY_ZERO`] instead of NaN or a signed infinity
/// when `denominator` is zero.
#[inline]
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        DIV_BY_ZERO
    } else {
        numerator / denominator
    }
}

/// Clamp `value` into `[low, high]`. NaN clamps to `low`.
#[inline]
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    debug_assert!(low <= high);
    if value.is_nan() || value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}
