//! Embarkation port analysis.

use maiden_records::{RecordSet, passenger::Port};
use maiden_stats::grouping::{GroupRate, group_counts, group_rates, percentage};

use crate::{
    AnalysisError,
    aggregate::{SURVIVAL_TRIGGERS, mentions_any},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

const PORTS: [Port; 3] = [Port::Cherbourg, Port::Queenstown, Port::Southampton];

/// Per-port passenger share and survival rate.
///
/// The summary spells out all three ports, so each must be populated.
struct PortBreakdown {
    count: usize,
    percent: f64,
    survival_rate: f64,
}

fn port_breakdown(records: &RecordSet) -> Result<[PortBreakdown; 3], AnalysisError> {
    let counts = group_counts(records.iter().map(|record| record.embarked));
    let rates = group_rates(records.iter().map(|record| (record.embarked, record.survived)));
    let entry = |port: Port| {
        let count = counts.get(&port).copied().unwrap_or(0);
        let percent = (count > 0)
            .then(|| percentage(count, records.len()))
            .flatten();
        let survival_rate = rates.get(&port).and_then(GroupRate::rate_percent);
        match (percent, survival_rate) {
            (Some(percent), Some(survival_rate)) => Ok(PortBreakdown {
                count,
                percent,
                survival_rate,
            }),
            _ => Err(AnalysisError::degenerate(format!(
                "passengers embarked at {}",
                port.name()
            ))),
        }
    };
    Ok([entry(PORTS[0])?, entry(PORTS[1])?, entry(PORTS[2])?])
}

/// Analyzes where passengers boarded and how boarding port related to
/// survival.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let breakdown = port_breakdown(records)?;
    let [cherbourg, queenstown, southampton] = &breakdown;

    let query_lower = query.to_lowercase();
    let (payload, visualization, title) = if mentions_any(&query_lower, SURVIVAL_TRIGGERS) {
        let mut payload = TablePayload::new(["Port of Embarkation", "Survival Rate (%)"]);
        for (port, entry) in PORTS.iter().zip(&breakdown) {
            payload.push_row([Cell::from(port.name()), Cell::Float(entry.survival_rate)]);
        }
        (
            payload,
            VisualizationKind::Bar,
            "Survival Rate by Port of Embarkation",
        )
    } else {
        // Pie slices are ordered by descending count, port name as tie-break.
        let mut slices = PORTS
            .iter()
            .zip(&breakdown)
            .map(|(port, entry)| (*port, entry.count))
            .collect::<Vec<_>>();
        slices.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.name().cmp(b.0.name())));
        let mut payload = TablePayload::new(["Port of Embarkation", "Count"]);
        for (port, count) in slices {
            payload.push_row([
                Cell::from(port.name()),
                Cell::Int(count.try_into().unwrap_or(i64::MAX)),
            ]);
        }
        (
            payload,
            VisualizationKind::Pie,
            "Embarkation Port Distribution",
        )
    };

    let summary = format!(
        "{:.1}% of passengers embarked from Southampton, \
         {:.1}% from Cherbourg, and {:.1}% from Queenstown. \
         The survival rates were {:.1}% for Southampton, \
         {:.1}% for Cherbourg, and {:.1}% for Queenstown.",
        southampton.percent,
        cherbourg.percent,
        queenstown.percent,
        southampton.survival_rate,
        cherbourg.survival_rate,
        queenstown.survival_rate,
    );

    Ok(Analysis {
        payload,
        visualization,
        title: title.to_owned(),
        summary,
    })
}
