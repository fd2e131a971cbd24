/// Descriptive statistics summarizing a dataset.
///
/// This structure contains the measures of central tendency and spread that
/// the analysis engine interpolates into its summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    ///
    /// For an even number of observations this is the mean of the two middle
    /// values, matching the convention of most dataframe libraries.
    pub median: f64,
    /// The sample standard deviation (`n - 1` denominator) of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// The values are collected and sorted internally before computing
    /// order statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use maiden_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Use this when the data is already sorted to avoid a redundant sort.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use maiden_stats::descriptive::DescriptiveStats;
    /// let values = [1.0, 2.0, 3.0, 4.0];
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = median_of_sorted(sorted_values)?;
        let std_dev = if count < 2 {
            0.0
        } else {
            let sum_sq = sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        };

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev,
        })
    }
}

/// Returns the median of values sorted in ascending order.
///
/// Interpolates the two middle values for even-sized datasets.
///
/// # Examples
///
/// ```
/// # use maiden_stats::descriptive::median_of_sorted;
/// assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(median_of_sorted(&[]), None);
/// ```
#[must_use]
pub fn median_of_sorted(sorted_values: &[f64]) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    let median = if n % 2 == 0 {
        f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
    } else {
        sorted_values[mid]
    };
    Some(median)
}

/// Returns the `q`-quantile (`0.0..=1.0`) of values sorted in ascending
/// order, using linear interpolation between adjacent observations.
///
/// This matches the interpolation convention of common dataframe libraries,
/// which the fare quartile bins must reproduce exactly.
///
/// # Examples
///
/// ```
/// # use maiden_stats::descriptive::quantile_of_sorted;
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_of_sorted(&values, 0.5), Some(2.5));
/// assert_eq!(quantile_of_sorted(&values, 0.25), Some(1.75));
/// assert_eq!(quantile_of_sorted(&[], 0.5), None);
/// ```
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn quantile_of_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    if sorted_values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let position = q * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let fraction = position - position.floor();
    let value = if fraction == 0.0 {
        sorted_values[lower]
    } else {
        sorted_values[lower] + (sorted_values[lower + 1] - sorted_values[lower]) * fraction
    };
    Some(value)
}
