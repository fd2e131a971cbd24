//! Hypothesis tests used by the dataset profile report.
//!
//! Two canonical tests are provided: Welch's unequal-variance t-test for
//! comparing the means of two samples, and the chi-squared test of
//! independence over a contingency table.
//!
//! Significance is judged at α = 0.05 against fixed critical values rather
//! than exact p-values. Welch degrees of freedom on this dataset are in the
//! hundreds, where the t distribution is indistinguishable from the normal,
//! so the 1.96 two-sided critical value applies; chi-squared critical values
//! are tabulated for df 1 through 10.

/// Two-sided critical value of the standard normal at α = 0.05.
const NORMAL_CRIT_05: f64 = 1.959_963_984_540_054;

/// Upper critical values of the chi-squared distribution at α = 0.05 for
/// degrees of freedom 1 through 10.
const CHI_SQUARED_CRIT_05: [f64; 10] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307,
];

/// Result of Welch's unequal-variance t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTTest {
    /// The t statistic.
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Whether the difference in means is significant at α = 0.05.
    pub significant: bool,
}

/// Result of the chi-squared test of independence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquaredTest {
    /// The chi-squared statistic.
    pub statistic: f64,
    /// Degrees of freedom: `(rows - 1) * (columns - 1)`.
    pub degrees_of_freedom: usize,
    /// Whether the association is significant at α = 0.05.
    pub significant: bool,
}

/// Performs Welch's t-test for the difference in means of two samples.
///
/// Returns `None` when either sample has fewer than two observations, or
/// when both samples have zero variance (the statistic is undefined).
///
/// # Examples
///
/// ```
/// # use maiden_stats::hypothesis::welch_t_test;
/// let a = [30.0, 32.0, 29.0, 31.0, 30.5, 28.0, 33.0, 30.0];
/// let b = [20.0, 22.0, 19.0, 21.0, 20.5, 18.0, 23.0, 20.0];
/// let result = welch_t_test(&a, &b).unwrap();
/// assert!(result.statistic > 0.0);
/// assert!(result.significant);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<WelchTTest> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n_a;
    let mean_b = b.iter().sum::<f64>() / n_b;
    let var_a = a.iter().map(|v| (v - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b = b.iter().map(|v| (v - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let pooled = se_a + se_b;
    if pooled == 0.0 {
        return None;
    }

    let statistic = (mean_a - mean_b) / pooled.sqrt();
    let degrees_of_freedom =
        pooled.powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));

    Some(WelchTTest {
        statistic,
        degrees_of_freedom,
        significant: statistic.abs() > NORMAL_CRIT_05,
    })
}

/// Performs the chi-squared test of independence over a contingency table.
///
/// Rows are groups, columns are outcomes; cells hold observed counts.
/// Returns `None` when the table is degenerate: fewer than two rows or
/// columns, ragged rows, df outside the tabulated 1..=10 range, or any
/// zero row/column total.
///
/// # Examples
///
/// ```
/// # use maiden_stats::hypothesis::chi_squared_test;
/// // Independent table: identical outcome proportions per row.
/// let table = vec![vec![10.0, 10.0], vec![20.0, 20.0]];
/// let result = chi_squared_test(&table).unwrap();
/// assert!(result.statistic.abs() < 1e-12);
/// assert!(!result.significant);
/// ```
#[must_use]
pub fn chi_squared_test(table: &[Vec<f64>]) -> Option<ChiSquaredTest> {
    let rows = table.len();
    let cols = table.first()?.len();
    if rows < 2 || cols < 2 || table.iter().any(|row| row.len() != cols) {
        return None;
    }

    let degrees_of_freedom = (rows - 1) * (cols - 1);
    if !(1..=CHI_SQUARED_CRIT_05.len()).contains(&degrees_of_freedom) {
        return None;
    }

    let row_totals = table
        .iter()
        .map(|row| row.iter().sum::<f64>())
        .collect::<Vec<_>>();
    let col_totals = (0..cols)
        .map(|c| table.iter().map(|row| row[c]).sum::<f64>())
        .collect::<Vec<_>>();
    let grand_total = row_totals.iter().sum::<f64>();
    if grand_total == 0.0
        || row_totals.iter().any(|&t| t == 0.0)
        || col_totals.iter().any(|&t| t == 0.0)
    {
        return None;
    }

    let mut statistic = 0.0;
    for (r, row) in table.iter().enumerate() {
        for (c, &observed) in row.iter().enumerate() {
            let expected = row_totals[r] * col_totals[c] / grand_total;
            statistic += (observed - expected).powi(2) / expected;
        }
    }

    Some(ChiSquaredTest {
        statistic,
        degrees_of_freedom,
        significant: statistic > CHI_SQUARED_CRIT_05[degrees_of_freedom - 1],
    })
}
