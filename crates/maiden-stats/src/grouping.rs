//! Rates and percentage breakdowns per categorical group.
//!
//! These helpers back every "X by Y" aggregation in the analysis engine:
//! survival rate by class, passenger counts by port, and so on. Rates over
//! empty groups are reported as `None` so callers can decide whether an
//! empty bucket is an error; percentages over an exhaustive grouping always
//! sum to 100 within floating-point tolerance.

use std::collections::BTreeMap;

/// Event counts for a single group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupRate {
    /// Number of observations in the group.
    pub count: usize,
    /// Number of observations for which the event occurred.
    pub events: usize,
}

impl GroupRate {
    /// Returns the event rate as a percentage of the group, or `None` for an
    /// empty group.
    ///
    /// # Examples
    ///
    /// ```
    /// # use maiden_stats::grouping::GroupRate;
    /// let rate = GroupRate { count: 4, events: 3 };
    /// assert_eq!(rate.rate_percent(), Some(75.0));
    /// assert_eq!(GroupRate::default().rate_percent(), None);
    /// ```
    #[must_use]
    pub fn rate_percent(&self) -> Option<f64> {
        percentage(self.events, self.count)
    }
}

/// Returns the rate of `true` observations as a percentage of the whole.
///
/// Returns `None` for an empty iterator rather than dividing by zero.
///
/// # Examples
///
/// ```
/// # use maiden_stats::grouping::rate_percent;
/// assert_eq!(rate_percent([true, true, false, false]), Some(50.0));
/// assert_eq!(rate_percent([]), None);
/// ```
#[must_use]
pub fn rate_percent<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = bool>,
{
    let mut total = GroupRate::default();
    for value in values {
        total.count += 1;
        total.events += usize::from(value);
    }
    total.rate_percent()
}

/// Accumulates per-group event counts from `(group, event)` observations.
///
/// Groups are keyed in ascending order, which gives deterministic iteration
/// for summary text and chart payloads.
///
/// # Examples
///
/// ```
/// # use maiden_stats::grouping::group_rates;
/// let observations = [(1, true), (1, false), (3, true)];
/// let rates = group_rates(observations);
/// assert_eq!(rates[&1].rate_percent(), Some(50.0));
/// assert_eq!(rates[&3].rate_percent(), Some(100.0));
/// assert!(!rates.contains_key(&2));
/// ```
#[must_use]
pub fn group_rates<K, I>(observations: I) -> BTreeMap<K, GroupRate>
where
    K: Ord,
    I: IntoIterator<Item = (K, bool)>,
{
    let mut rates: BTreeMap<K, GroupRate> = BTreeMap::new();
    for (key, event) in observations {
        let entry = rates.entry(key).or_default();
        entry.count += 1;
        entry.events += usize::from(event);
    }
    rates
}

/// Counts occurrences of each group key.
///
/// # Examples
///
/// ```
/// # use maiden_stats::grouping::group_counts;
/// let counts = group_counts(["a", "b", "a"]);
/// assert_eq!(counts[&"a"], 2);
/// assert_eq!(counts[&"b"], 1);
/// ```
#[must_use]
pub fn group_counts<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Returns `part` as a percentage of `total`, or `None` when `total` is zero.
///
/// # Examples
///
/// ```
/// # use maiden_stats::grouping::percentage;
/// assert_eq!(percentage(1, 4), Some(25.0));
/// assert_eq!(percentage(0, 0), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_percent_all_events() {
        assert_eq!(rate_percent([true, true]), Some(100.0));
    }

    #[test]
    fn test_rate_percent_no_events() {
        assert_eq!(rate_percent([false, false, false]), Some(0.0));
    }

    #[test]
    fn test_group_rates_keys_sorted() {
        let rates = group_rates([(3, true), (1, false), (2, true)]);
        let keys = rates.keys().copied().collect::<Vec<_>>();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_exhaustive_percentages_sum_to_100() {
        let counts = group_counts([1, 1, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3]);
        let total = counts.values().sum::<usize>();
        let sum = counts
            .values()
            .map(|&count| percentage(count, total).unwrap())
            .sum::<f64>();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_group_rate_is_none() {
        let rates = group_rates::<u8, _>([]);
        assert!(rates.is_empty());
        assert_eq!(GroupRate::default().rate_percent(), None);
    }
}
