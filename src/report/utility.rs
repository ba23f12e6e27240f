/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
///
/// Finite inputs always give a finite mean: if the plain sum overflows, each
/// value is divided by the count before summing.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }
    values.iter().map(|v| v / n).sum()
}

/// Rounds to 2 decimal places, the precision marks are displayed with.
///
/// Values too large to scale are already whole and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
