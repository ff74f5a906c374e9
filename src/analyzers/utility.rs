/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input so missing data is never reported as a zero mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// `part / total` as a percentage rounded to `decimals` places, or `None`
/// when `total` is zero.
pub fn pct(part: u64, total: u64, decimals: i32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(round_to(part as f64 / total as f64 * 100.0, decimals))
}
