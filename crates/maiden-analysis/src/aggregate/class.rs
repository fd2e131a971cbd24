//! Passenger-class distribution analysis.

use maiden_records::RecordSet;
use maiden_stats::grouping::{group_counts, percentage};

use crate::{
    AnalysisError,
    aggregate::{SURVIVAL_TRIGGERS, mentions_any, survival_rate_by_class},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

/// Class counts and percentages for classes 1 through 3.
///
/// Every class must be populated: the summary indexes all three.
fn class_breakdown(records: &RecordSet) -> Result<[(usize, f64); 3], AnalysisError> {
    let counts = group_counts(records.iter().map(|record| record.pclass));
    let total = records.len();
    let mut breakdown = [(0usize, 0.0f64); 3];
    for class in 1..=3u8 {
        let count = counts.get(&class).copied().unwrap_or(0);
        let percent = (count > 0)
            .then(|| percentage(count, total))
            .flatten()
            .ok_or_else(|| AnalysisError::degenerate(format!("passenger class {class}")))?;
        breakdown[usize::from(class) - 1] = (count, percent);
    }
    Ok(breakdown)
}

/// Analyzes the passenger class distribution and per-class survival.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let breakdown = class_breakdown(records)?;
    let survival = survival_rate_by_class(records)?;

    let query_lower = query.to_lowercase();
    let (payload, title) = if mentions_any(&query_lower, SURVIVAL_TRIGGERS) {
        let mut payload = TablePayload::new(["Passenger Class", "Survival Rate (%)"]);
        for (class, rate) in (1i64..).zip(survival) {
            payload.push_row([Cell::Int(class), Cell::Float(rate)]);
        }
        (payload, "Survival Rate by Passenger Class")
    } else {
        let mut payload = TablePayload::new(["Passenger Class", "Count"]);
        for (class, (count, _)) in (1i64..).zip(breakdown) {
            payload.push_row([Cell::Int(class), Cell::Int(count.try_into().unwrap_or(i64::MAX))]);
        }
        (payload, "Passenger Class Distribution")
    };

    let summary = format!(
        "There were {} first class passengers ({:.1}%), \
         {} second class passengers ({:.1}%), and \
         {} third class passengers ({:.1}%). \
         The survival rates were {:.1}% for first class, \
         {:.1}% for second class, and {:.1}% for third class.",
        breakdown[0].0,
        breakdown[0].1,
        breakdown[1].0,
        breakdown[1].1,
        breakdown[2].0,
        breakdown[2].1,
        survival[0],
        survival[1],
        survival[2],
    );

    Ok(Analysis {
        payload,
        visualization: VisualizationKind::Bar,
        title: title.to_owned(),
        summary,
    })
}
