//! Whole-dataset statistical profile.
//!
//! Unlike the per-query aggregations, the profile is computed in one pass
//! over everything the dataset offers: survival rates across every grouping,
//! demographic breakdowns, fare statistics, pairwise correlations, and
//! hypothesis tests. The CLI `report` command renders it.

use std::collections::BTreeMap;

use maiden_records::{PassengerRecord, RecordSet};
use maiden_stats::{
    correlation::pearson,
    descriptive::DescriptiveStats,
    grouping::{GroupRate, group_counts, group_rates, percentage, rate_percent},
    hypothesis::{ChiSquaredTest, WelchTTest, chi_squared_test, welch_t_test},
};
use serde::Serialize;

use crate::AnalysisError;

/// Survival rate of one passenger group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEntry {
    pub group: String,
    pub rate_percent: f64,
}

/// Headcount and share of one passenger group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub group: String,
    pub count: usize,
    pub percent: f64,
}

/// Serializable mirror of [`DescriptiveStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl From<DescriptiveStats> for NumericSummary {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            mean: stats.mean,
            median: stats.median,
            min: stats.min,
            max: stats.max,
            std_dev: stats.std_dev,
        }
    }
}

/// Fare statistics of one passenger group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareGroupEntry {
    pub group: String,
    pub stats: NumericSummary,
}

/// Correlation of one numeric field with survival.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub field: &'static str,
    pub coefficient: f64,
}

/// One of the strongest pairwise correlations in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub first: &'static str,
    pub second: &'static str,
    pub coefficient: f64,
}

/// Serializable mirror of [`WelchTTest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestEntry {
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    pub significant: bool,
}

impl From<WelchTTest> for TTestEntry {
    fn from(test: WelchTTest) -> Self {
        Self {
            statistic: test.statistic,
            degrees_of_freedom: test.degrees_of_freedom,
            significant: test.significant,
        }
    }
}

/// Serializable mirror of [`ChiSquaredTest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquaredEntry {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub significant: bool,
}

impl From<ChiSquaredTest> for ChiSquaredEntry {
    fn from(test: ChiSquaredTest) -> Self {
        Self {
            statistic: test.statistic,
            degrees_of_freedom: test.degrees_of_freedom,
            significant: test.significant,
        }
    }
}

/// Survival rates across every grouping.
///
/// Only populated groups appear; a dataset with no seniors simply has no
/// Senior entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalProfile {
    pub overall_percent: f64,
    pub by_class: Vec<RateEntry>,
    pub by_sex: Vec<RateEntry>,
    pub by_age_group: Vec<RateEntry>,
    pub by_port: Vec<RateEntry>,
    pub by_family_size: Vec<RateEntry>,
}

/// Who was aboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicProfile {
    pub total_passengers: usize,
    pub classes: Vec<CountEntry>,
    pub genders: Vec<CountEntry>,
    pub ages: NumericSummary,
    pub age_groups: Vec<CountEntry>,
    pub ports: Vec<CountEntry>,
    pub family_sizes: NumericSummary,
}

/// What they paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareProfile {
    pub overall: NumericSummary,
    pub by_class: Vec<FareGroupEntry>,
    pub by_survival: Vec<FareGroupEntry>,
    pub by_port: Vec<FareGroupEntry>,
}

/// How the numeric fields move together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationProfile {
    pub with_survival: Vec<CorrelationEntry>,
    /// The five largest pairwise correlations by absolute value.
    pub strongest_pairs: Vec<CorrelationPair>,
}

/// Hypothesis tests of the classic survival factors.
///
/// A test is `None` when it is undefined for the dataset, for example a
/// t-test against fewer than two survivors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HypothesisProfile {
    pub age_ttest: Option<TTestEntry>,
    pub fare_ttest: Option<TTestEntry>,
    pub class_chi_squared: Option<ChiSquaredEntry>,
    pub sex_chi_squared: Option<ChiSquaredEntry>,
    pub port_chi_squared: Option<ChiSquaredEntry>,
}

/// The complete dataset profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub survival: SurvivalProfile,
    pub demographics: DemographicProfile,
    pub fares: FareProfile,
    pub correlations: CorrelationProfile,
    pub tests: HypothesisProfile,
}

/// Numeric field accessors shared by the correlation computations.
const NUMERIC_FIELDS: &[(&str, fn(&PassengerRecord) -> f64)] = &[
    ("survived", |r| f64::from(u8::from(r.survived))),
    ("pclass", |r| f64::from(r.pclass)),
    ("age", |r| r.age),
    ("sibsp", |r| f64::from(r.sibsp)),
    ("parch", |r| f64::from(r.parch)),
    ("fare", |r| r.fare),
    ("family_size", |r| f64::from(r.family_size)),
    ("fare_per_person", |r| r.fare_per_person),
];

/// The family-size bins used by the survival breakdown: travelling alone,
/// up to three relatives aboard, or more.
fn family_size_label(extra_relatives: u32) -> &'static str {
    match extra_relatives {
        0 => "Alone",
        1..=3 => "Small Family",
        _ => "Large Family",
    }
}

fn rate_entries<K, I>(observations: I, label: impl Fn(K) -> String) -> Vec<RateEntry>
where
    K: Ord + Copy,
    I: IntoIterator<Item = (K, bool)>,
{
    group_rates(observations)
        .into_iter()
        .filter_map(|(key, rate)| {
            rate.rate_percent().map(|rate_percent| RateEntry {
                group: label(key),
                rate_percent,
            })
        })
        .collect()
}

fn count_entries<K, I>(keys: I, total: usize, label: impl Fn(K) -> String) -> Vec<CountEntry>
where
    K: Ord + Copy,
    I: IntoIterator<Item = K>,
{
    group_counts(keys)
        .into_iter()
        .filter_map(|(key, count)| {
            percentage(count, total).map(|percent| CountEntry {
                group: label(key),
                count,
                percent,
            })
        })
        .collect()
}

fn fare_entries<K, I>(groups: I, label: impl Fn(K) -> String) -> Vec<FareGroupEntry>
where
    K: Ord + Copy,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut grouped = BTreeMap::<K, Vec<f64>>::new();
    for (key, fare) in groups {
        grouped.entry(key).or_default().push(fare);
    }
    grouped
        .into_iter()
        .filter_map(|(key, fares)| {
            DescriptiveStats::new(fares).map(|stats| FareGroupEntry {
                group: label(key),
                stats: stats.into(),
            })
        })
        .collect()
}

/// Contingency table of survival counts keyed by an arbitrary grouping.
fn survival_contingency<K, I>(observations: I) -> Vec<Vec<f64>>
where
    K: Ord + Copy,
    I: IntoIterator<Item = (K, bool)>,
{
    group_rates(observations)
        .into_values()
        .map(|GroupRate { count, events }| {
            #[expect(clippy::cast_precision_loss)]
            let row = vec![(count - events) as f64, events as f64];
            row
        })
        .collect()
}

impl DatasetProfile {
    /// Builds the full profile over a record set.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDataset`] when the record set is empty.
    pub fn build(records: &RecordSet) -> Result<Self, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        Ok(Self {
            survival: Self::survival(records),
            demographics: Self::demographics(records)?,
            fares: Self::fares(records)?,
            correlations: Self::correlations(records),
            tests: Self::tests(records),
        })
    }

    fn survival(records: &RecordSet) -> SurvivalProfile {
        let overall_percent =
            rate_percent(records.iter().map(|record| record.survived)).unwrap_or_default();
        SurvivalProfile {
            overall_percent,
            by_class: rate_entries(
                records.iter().map(|r| (r.pclass, r.survived)),
                |class| class.to_string(),
            ),
            by_sex: rate_entries(
                records.iter().map(|r| (r.sex, r.survived)),
                |sex| sex.to_string(),
            ),
            by_age_group: rate_entries(
                records.iter().map(|r| (r.age_group, r.survived)),
                |group| group.label().to_owned(),
            ),
            by_port: rate_entries(
                records.iter().map(|r| (r.embarked, r.survived)),
                |port| port.name().to_owned(),
            ),
            by_family_size: rate_entries(
                records
                    .iter()
                    .map(|r| (family_size_label(r.sibsp + r.parch), r.survived)),
                str::to_owned,
            ),
        }
    }

    fn demographics(records: &RecordSet) -> Result<DemographicProfile, AnalysisError> {
        let total = records.len();
        let ages = DescriptiveStats::new(records.iter().map(|r| r.age))
            .ok_or(AnalysisError::EmptyDataset)?;
        let family_sizes =
            DescriptiveStats::new(records.iter().map(|r| f64::from(r.sibsp + r.parch)))
                .ok_or(AnalysisError::EmptyDataset)?;
        Ok(DemographicProfile {
            total_passengers: total,
            classes: count_entries(records.iter().map(|r| r.pclass), total, |class| {
                class.to_string()
            }),
            genders: count_entries(records.iter().map(|r| r.sex), total, |sex| {
                sex.to_string()
            }),
            ages: ages.into(),
            age_groups: count_entries(records.iter().map(|r| r.age_group), total, |group| {
                group.label().to_owned()
            }),
            ports: count_entries(records.iter().map(|r| r.embarked), total, |port| {
                port.name().to_owned()
            }),
            family_sizes: family_sizes.into(),
        })
    }

    fn fares(records: &RecordSet) -> Result<FareProfile, AnalysisError> {
        let overall = DescriptiveStats::new(records.iter().map(|r| r.fare))
            .ok_or(AnalysisError::EmptyDataset)?;
        Ok(FareProfile {
            overall: overall.into(),
            by_class: fare_entries(records.iter().map(|r| (r.pclass, r.fare)), |class| {
                class.to_string()
            }),
            by_survival: fare_entries(records.iter().map(|r| (r.survived, r.fare)), |survived| {
                if survived { "survived" } else { "did not survive" }.to_owned()
            }),
            by_port: fare_entries(records.iter().map(|r| (r.embarked, r.fare)), |port| {
                port.name().to_owned()
            }),
        })
    }

    fn correlations(records: &RecordSet) -> CorrelationProfile {
        let columns = NUMERIC_FIELDS
            .iter()
            .map(|&(name, accessor)| {
                (name, records.iter().map(accessor).collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();

        let with_survival = columns
            .iter()
            .skip(1)
            .filter_map(|&(name, ref values)| {
                pearson(&columns[0].1, values).map(|coefficient| CorrelationEntry {
                    field: name,
                    coefficient,
                })
            })
            .collect();

        let mut strongest_pairs = vec![];
        for (i, (first, first_values)) in columns.iter().enumerate() {
            for (second, second_values) in &columns[i + 1..] {
                if let Some(coefficient) = pearson(first_values, second_values) {
                    strongest_pairs.push(CorrelationPair {
                        first: *first,
                        second: *second,
                        coefficient,
                    });
                }
            }
        }
        strongest_pairs.sort_by(|a, b| {
            b.coefficient
                .abs()
                .total_cmp(&a.coefficient.abs())
                .then(a.first.cmp(b.first))
                .then(a.second.cmp(b.second))
        });
        strongest_pairs.truncate(5);

        CorrelationProfile {
            with_survival,
            strongest_pairs,
        }
    }

    fn tests(records: &RecordSet) -> HypothesisProfile {
        let split = |accessor: fn(&PassengerRecord) -> f64| {
            let mut survived = vec![];
            let mut lost = vec![];
            for record in records {
                if record.survived {
                    survived.push(accessor(record));
                } else {
                    lost.push(accessor(record));
                }
            }
            (survived, lost)
        };

        let (survived_ages, lost_ages) = split(|r| r.age);
        let (survived_fares, lost_fares) = split(|r| r.fare);

        HypothesisProfile {
            age_ttest: welch_t_test(&survived_ages, &lost_ages).map(Into::into),
            fare_ttest: welch_t_test(&survived_fares, &lost_fares).map(Into::into),
            class_chi_squared: chi_squared_test(&survival_contingency(
                records.iter().map(|r| (r.pclass, r.survived)),
            ))
            .map(Into::into),
            sex_chi_squared: chi_squared_test(&survival_contingency(
                records.iter().map(|r| (r.sex, r.survived)),
            ))
            .map(Into::into),
            port_chi_squared: chi_squared_test(&survival_contingency(
                records.iter().map(|r| (r.embarked, r.survived)),
            ))
            .map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testutil::{lone_survivor, sample_records};

    #[test]
    fn test_survival_profile_groupings() {
        let profile = DatasetProfile::build(&sample_records()).unwrap();
        assert_eq!(profile.survival.overall_percent, 40.0);
        assert_eq!(profile.survival.by_class.len(), 3);
        assert_eq!(profile.survival.by_class[0].group, "1");
        assert!((profile.survival.by_class[0].rate_percent - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            profile.survival.by_sex[0],
            RateEntry {
                group: "female".to_owned(),
                rate_percent: 75.0,
            }
        );
        // No teens or seniors in the fixture, so neither group appears.
        let age_groups = profile
            .survival
            .by_age_group
            .iter()
            .map(|entry| entry.group.as_str())
            .collect::<Vec<_>>();
        assert_eq!(age_groups, ["Child", "Young Adult", "Adult"]);
        // Everyone in the fixture travels alone.
        assert_eq!(profile.survival.by_family_size.len(), 1);
        assert_eq!(profile.survival.by_family_size[0].group, "Alone");
        assert_eq!(profile.survival.by_family_size[0].rate_percent, 40.0);
    }

    #[test]
    fn test_demographics_and_fares() {
        let profile = DatasetProfile::build(&sample_records()).unwrap();
        assert_eq!(profile.demographics.total_passengers, 10);
        assert_eq!(profile.demographics.ages.mean, 34.5);
        assert_eq!(profile.demographics.ages.median, 32.5);
        assert_eq!(profile.fares.overall.mean, 34.9);
        let first_class = &profile.fares.by_class[0];
        assert_eq!(first_class.group, "1");
        assert_eq!(first_class.stats.mean, 80.0);
        let survivors = profile
            .fares
            .by_survival
            .iter()
            .find(|entry| entry.group == "survived")
            .unwrap();
        assert_eq!(survivors.stats.mean, 55.0);
    }

    #[test]
    fn test_correlations_are_bounded_and_ranked() {
        let profile = DatasetProfile::build(&sample_records()).unwrap();
        for entry in &profile.correlations.with_survival {
            assert!(entry.coefficient.abs() <= 1.0 + 1e-9, "{}", entry.field);
        }
        // Higher fares go with survival in the fixture.
        let fare = profile
            .correlations
            .with_survival
            .iter()
            .find(|entry| entry.field == "fare")
            .unwrap();
        assert!(fare.coefficient > 0.0);
        assert!(profile.correlations.strongest_pairs.len() <= 5);
        let magnitudes = profile
            .correlations
            .strongest_pairs
            .iter()
            .map(|pair| pair.coefficient.abs())
            .collect::<Vec<_>>();
        assert!(magnitudes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_hypothesis_tests_present_for_fixture() {
        let profile = DatasetProfile::build(&sample_records()).unwrap();
        // Survivors paid more on average, so the fare statistic is positive.
        assert!(profile.tests.fare_ttest.unwrap().statistic > 0.0);
        assert!(profile.tests.age_ttest.is_some());
        assert_eq!(profile.tests.class_chi_squared.unwrap().degrees_of_freedom, 2);
        assert_eq!(profile.tests.sex_chi_squared.unwrap().degrees_of_freedom, 1);
    }

    #[test]
    fn test_degenerate_groups_are_skipped_not_nan() {
        let profile = DatasetProfile::build(&lone_survivor()).unwrap();
        assert_eq!(profile.survival.by_class.len(), 1);
        assert_eq!(profile.survival.by_class[0].group, "3");
        // A one-passenger split leaves the t-tests undefined.
        assert_eq!(profile.tests.age_ttest, None);
        assert!(profile.survival.overall_percent.is_finite());
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("NaN"));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let empty = RecordSet::preprocess(vec![]).unwrap();
        assert_eq!(
            DatasetProfile::build(&empty).unwrap_err(),
            AnalysisError::EmptyDataset
        );
    }
}
