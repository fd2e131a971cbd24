//! Pearson correlation for paired samples.

/// Computes the Pearson correlation coefficient of two paired samples.
///
/// Returns `None` when the samples differ in length, contain fewer than two
/// observations, or when either sample has zero variance (the coefficient is
/// undefined in those cases).
///
/// # Examples
///
/// ```
/// # use maiden_stats::correlation::pearson;
/// let xs = [1.0, 2.0, 3.0, 4.0];
/// let ys = [2.0, 4.0, 6.0, 8.0];
/// let r = pearson(&xs, &ys).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
///
/// // Constant sample: undefined.
/// assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_negative_correlation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [6.0, 4.0, 2.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, -1.0, -1.0, 1.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_too_few_observations() {
        assert_eq!(pearson(&[1.0], &[1.0]), None);
    }

    #[test]
    fn test_known_value() {
        // Hand-computed: cov = 6, var_x = 10, var_y = 6, r = 6 / sqrt(60).
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 5.0, 4.0, 5.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 6.0 / 60.0f64.sqrt()).abs() < 1e-12);
    }
}
