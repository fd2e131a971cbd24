//! Per-intent aggregation functions.
//!
//! Each submodule exposes `analyze(records, query) -> Result<Analysis, _>`
//! for one intent: it computes the intent's statistics, re-scans the query
//! for sub-keywords to pick a visualization framing, and renders the
//! computed summary sentence(s). Framing selection is a declarative ordered
//! list of `(triggers, framing)` pairs evaluated first-match-wins, so the
//! precedence between, say, "fare by class" and "fare distribution" is
//! explicit and testable.
//!
//! Any rate or mean over an empty group fails with
//! [`AnalysisError::DegenerateAggregation`]; summaries never interpolate
//! NaN.

use maiden_records::{
    RecordSet,
    passenger::{Port, Sex},
};
use maiden_stats::grouping::{GroupRate, group_rates, rate_percent};

use crate::AnalysisError;

pub mod age;
pub mod class;
pub mod embarked;
pub mod fare;
pub mod gender;
pub mod general;
pub mod survival;

/// Sub-keywords that make an analyzer fold survival into its framing.
pub(crate) const SURVIVAL_TRIGGERS: &[&str] = &["survival", "survived"];

/// Returns true when any trigger occurs in the lower-cased query.
pub(crate) fn mentions_any(query_lower: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|trigger| query_lower.contains(trigger))
}

/// Picks the first framing whose trigger set matches the query.
pub(crate) fn pick_framing<F: Copy>(
    query_lower: &str,
    table: &[(&[&str], F)],
    default: F,
) -> F {
    table
        .iter()
        .find(|(triggers, _)| mentions_any(query_lower, triggers))
        .map_or(default, |&(_, framing)| framing)
}

/// Mean of an iterator of values, `None` when empty.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn mean_of<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Overall survival rate with the total passenger count as denominator.
pub(crate) fn overall_survival_rate(records: &RecordSet) -> Result<f64, AnalysisError> {
    rate_percent(records.iter().map(|record| record.survived))
        .ok_or(AnalysisError::EmptyDataset)
}

/// Survival rates for classes 1 through 3; every class must be populated.
pub(crate) fn survival_rate_by_class(records: &RecordSet) -> Result<[f64; 3], AnalysisError> {
    let rates = group_rates(records.iter().map(|record| (record.pclass, record.survived)));
    let mut by_class = [0.0; 3];
    for class in 1..=3u8 {
        by_class[usize::from(class) - 1] = rates
            .get(&class)
            .and_then(GroupRate::rate_percent)
            .ok_or_else(|| AnalysisError::degenerate(format!("passenger class {class}")))?;
    }
    Ok(by_class)
}

/// Survival rate per sex; both sexes must be populated.
pub(crate) fn survival_rate_by_sex(records: &RecordSet) -> Result<SexRates, AnalysisError> {
    let rates = group_rates(records.iter().map(|record| (record.sex, record.survived)));
    let rate_for = |sex: Sex| {
        rates
            .get(&sex)
            .and_then(GroupRate::rate_percent)
            .ok_or_else(|| AnalysisError::degenerate(format!("{sex} passengers")))
    };
    Ok(SexRates {
        female: rate_for(Sex::Female)?,
        male: rate_for(Sex::Male)?,
    })
}

/// Survival rate per embarkation port, in code order (C, Q, S); only ports
/// with passengers appear.
pub(crate) fn survival_rate_by_port(records: &RecordSet) -> Vec<(Port, f64)> {
    group_rates(records.iter().map(|record| (record.embarked, record.survived)))
        .into_iter()
        .filter_map(|(port, rate)| rate.rate_percent().map(|rate| (port, rate)))
        .collect()
}

/// Survival rates split by sex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SexRates {
    pub(crate) female: f64,
    pub(crate) male: f64,
}

#[cfg(test)]
pub(crate) mod testutil {
    use maiden_records::{
        RecordSet,
        dataset::RawPassenger,
        passenger::{Port, Sex},
    };

    /// Ten hand-checkable passengers covering every class, both sexes, and
    /// all three ports.
    ///
    /// Known aggregates: overall survival 40.0%; by class 66.7/33.3/25.0;
    /// female 75.0%, male 16.7%; ports C 66.7%, Q 0.0%, S 40.0%;
    /// ages mean 34.5 / median 32.5 / min 10 / max 60;
    /// fares mean 34.9 / median 22.5 / min 7 / max 100,
    /// per-class means 80.0 / 25.0 / 8.5.
    pub(crate) fn sample_records() -> RecordSet {
        let rows = [
            (true, 1, "First, Mrs. Alpha", Sex::Female, 30.0, 100.0, Port::Cherbourg),
            (true, 1, "First, Mr. Bravo", Sex::Male, 40.0, 80.0, Port::Cherbourg),
            (false, 1, "First, Mr. Charlie", Sex::Male, 50.0, 60.0, Port::Southampton),
            (true, 2, "Second, Miss. Delta", Sex::Female, 20.0, 30.0, Port::Southampton),
            (false, 2, "Second, Mr. Echo", Sex::Male, 35.0, 25.0, Port::Southampton),
            (false, 2, "Second, Mr. Foxtrot", Sex::Male, 45.0, 20.0, Port::Queenstown),
            (true, 3, "Third, Miss. Golf", Sex::Female, 10.0, 10.0, Port::Southampton),
            (false, 3, "Third, Mr. Hotel", Sex::Male, 25.0, 8.0, Port::Southampton),
            (false, 3, "Third, Mr. India", Sex::Male, 30.0, 7.0, Port::Queenstown),
            (false, 3, "Third, Mrs. Juliet", Sex::Female, 60.0, 9.0, Port::Cherbourg),
        ];
        let rows = rows
            .into_iter()
            .map(|(survived, pclass, name, sex, age, fare, embarked)| RawPassenger {
                survived,
                pclass,
                name: name.to_owned(),
                sex,
                age: Some(age),
                sibsp: 0,
                parch: 0,
                ticket: String::new(),
                fare: Some(fare),
                cabin: None,
                embarked: Some(embarked),
            })
            .collect();
        RecordSet::preprocess(rows).expect("sample records are valid")
    }

    /// A degenerate set: one surviving third-class man and nothing else.
    pub(crate) fn lone_survivor() -> RecordSet {
        let rows = vec![RawPassenger {
            survived: true,
            pclass: 3,
            name: "Lone, Mr. Survivor".to_owned(),
            sex: Sex::Male,
            age: Some(27.0),
            sibsp: 0,
            parch: 0,
            ticket: String::new(),
            fare: Some(7.75),
            cabin: None,
            embarked: Some(Port::Queenstown),
        }];
        RecordSet::preprocess(rows).expect("lone survivor is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::{testutil::*, *};

    #[test]
    fn test_overall_rate_uses_total_denominator() {
        assert_eq!(overall_survival_rate(&sample_records()).unwrap(), 40.0);
        // A single survivor and zero non-survivors is still well-defined.
        assert_eq!(overall_survival_rate(&lone_survivor()).unwrap(), 100.0);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let empty = RecordSet::preprocess(vec![]).unwrap();
        assert_eq!(
            overall_survival_rate(&empty).unwrap_err(),
            AnalysisError::EmptyDataset
        );
    }

    #[test]
    fn test_class_rates_require_every_class() {
        let rates = survival_rate_by_class(&sample_records()).unwrap();
        assert!((rates[0] - 200.0 / 3.0).abs() < 1e-9);
        assert!((rates[1] - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(rates[2], 25.0);

        // Classes 1 and 2 are empty for the lone survivor.
        let err = survival_rate_by_class(&lone_survivor()).unwrap_err();
        assert_eq!(err, AnalysisError::degenerate("passenger class 1"));
    }

    #[test]
    fn test_sex_rates() {
        let rates = survival_rate_by_sex(&sample_records()).unwrap();
        assert_eq!(rates.female, 75.0);
        assert!((rates.male - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_port_rates_skip_missing_ports() {
        let rates = survival_rate_by_port(&lone_survivor());
        assert_eq!(rates, vec![(Port::Queenstown, 100.0)]);
    }

    #[test]
    fn test_pick_framing_first_match_wins() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Framing {
            A,
            B,
            Default,
        }
        let table: &[(&[&str], Framing)] =
            &[(&["class"], Framing::A), (&["survival"], Framing::B)];
        assert_eq!(
            pick_framing("survival by class", table, Framing::Default),
            Framing::A
        );
        assert_eq!(pick_framing("survival", table, Framing::Default), Framing::B);
        assert_eq!(pick_framing("nothing", table, Framing::Default), Framing::Default);
    }
}
