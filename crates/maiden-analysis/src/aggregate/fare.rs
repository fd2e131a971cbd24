//! Ticket fare analysis.

use maiden_records::RecordSet;
use maiden_stats::descriptive::DescriptiveStats;

use crate::{
    AnalysisError,
    aggregate::{mean_of, mentions_any, pick_framing},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Framing {
    ByClass,
    BySurvival,
    Distribution,
}

/// "relate" and "relationship" signal fare-versus-survival questions
/// ("related" matches via the "relate" substring). The bare stem `relat` is
/// not usable here: it sits inside "correlation" and would claim queries
/// meant for the correlation narrative.
const FRAMINGS: &[(&[&str], Framing)] = &[
    (&["class"], Framing::ByClass),
    (
        &["survival", "survived", "relate", "relationship"],
        Framing::BySurvival,
    ),
    (
        &["distribution", "histogram", "spread", "range", "variation"],
        Framing::Distribution,
    ),
];

const RELATIONSHIP_ADDENDUM: &str = " There appears to be a correlation between ticket \
     prices and survival rates. Higher fares were generally associated with better \
     accommodations and possibly better access to lifeboats, which may have contributed \
     to higher survival rates among passengers who paid more for their tickets.";

/// Mean fare for classes 1 through 3; every class must be populated.
fn mean_fare_by_class(records: &RecordSet) -> Result<[f64; 3], AnalysisError> {
    let mut by_class = [0.0; 3];
    for class in 1..=3u8 {
        by_class[usize::from(class) - 1] = mean_of(
            records
                .iter()
                .filter(|record| record.pclass == class)
                .map(|record| record.fare),
        )
        .ok_or_else(|| AnalysisError::degenerate(format!("passenger class {class}")))?;
    }
    Ok(by_class)
}

/// Analyzes ticket fares: overall spread, per-class means, and the
/// fare-versus-survival relationship.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let stats = DescriptiveStats::new(records.iter().map(|record| record.fare))
        .ok_or(AnalysisError::EmptyDataset)?;
    let by_class = mean_fare_by_class(records)?;

    let query_lower = query.to_lowercase();
    let relationship = mentions_any(&query_lower, &["relate", "relationship"]);
    let survival_split =
        relationship || mentions_any(&query_lower, &["survival", "survived"]);

    let mut summary = format!(
        "The average fare was £{:.2}, with a median of £{:.2}. \
         Fares ranged from £{:.2} to £{:.2}. \
         First class passengers paid an average of £{:.2}, \
         second class paid £{:.2}, and third class paid £{:.2}.",
        stats.mean, stats.median, stats.min, stats.max, by_class[0], by_class[1], by_class[2],
    );
    if survival_split {
        let survivor_mean = mean_of(
            records
                .iter()
                .filter(|record| record.survived)
                .map(|record| record.fare),
        )
        .ok_or_else(|| AnalysisError::degenerate("surviving passengers"))?;
        let lost_mean = mean_of(
            records
                .iter()
                .filter(|record| !record.survived)
                .map(|record| record.fare),
        )
        .ok_or_else(|| AnalysisError::degenerate("non-surviving passengers"))?;
        summary.push_str(&format!(
            " Passengers who survived paid an average fare of £{survivor_mean:.2}, \
             while those who did not survive paid an average of £{lost_mean:.2}.",
        ));
    }
    if relationship {
        summary.push_str(RELATIONSHIP_ADDENDUM);
    }

    let (payload, visualization, title) =
        match pick_framing(&query_lower, FRAMINGS, Framing::ByClass) {
            Framing::ByClass => {
                let mut payload = TablePayload::new(["Passenger Class", "Average Fare"]);
                for (class, fare) in (1i64..).zip(by_class) {
                    payload.push_row([Cell::Int(class), Cell::Float(fare)]);
                }
                (payload, VisualizationKind::Bar, "Average Fare by Passenger Class")
            }
            Framing::BySurvival => {
                let mut payload = TablePayload::new(["Fare", "Survived"]);
                for record in records {
                    payload.push_row([Cell::Float(record.fare), Cell::Bool(record.survived)]);
                }
                (
                    payload,
                    VisualizationKind::Violin,
                    "Fare Distribution by Survival Status",
                )
            }
            Framing::Distribution => {
                let mut payload = TablePayload::new(["Fare"]);
                for record in records {
                    payload.push_row([Cell::Float(record.fare)]);
                }
                (
                    payload,
                    VisualizationKind::Kde,
                    "Fare Distribution of Titanic Passengers",
                )
            }
        };

    Ok(Analysis {
        payload,
        visualization,
        title: title.to_owned(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testutil::sample_records;

    #[test]
    fn test_default_framing_is_class_bar() {
        let analysis = analyze(&sample_records(), "How much did tickets cost?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Bar);
        assert_eq!(analysis.title, "Average Fare by Passenger Class");
        assert_eq!(
            analysis.payload.rows()[0],
            vec![Cell::Int(1), Cell::Float(80.0)]
        );
        assert_eq!(
            analysis.summary,
            "The average fare was £34.90, with a median of £22.50. \
             Fares ranged from £7.00 to £100.00. \
             First class passengers paid an average of £80.00, \
             second class paid £25.00, and third class paid £8.50."
        );
    }

    #[test]
    fn test_class_framing_beats_survival_framing() {
        let analysis =
            analyze(&sample_records(), "Fare by class for those who survived").unwrap();
        assert_eq!(analysis.title, "Average Fare by Passenger Class");
        // The survival sentence is still appended even under class framing.
        assert!(analysis.summary.contains("Passengers who survived paid"));
    }

    #[test]
    fn test_survival_framing_is_violin() {
        let analysis = analyze(&sample_records(), "Fares of survivors vs survived").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Violin);
        assert_eq!(analysis.title, "Fare Distribution by Survival Status");
        assert!(analysis.summary.ends_with(
            " Passengers who survived paid an average fare of £55.00, \
             while those who did not survive paid an average of £21.50."
        ));
        assert!(!analysis.summary.contains("lifeboats"));
    }

    #[test]
    fn test_relationship_phrasing_adds_addendum() {
        let analysis =
            analyze(&sample_records(), "How does fare relate to survival?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Violin);
        assert!(analysis.summary.contains("Passengers who survived paid"));
        assert!(analysis.summary.ends_with("for their tickets."));
    }

    #[test]
    fn test_correlation_wording_does_not_trigger_relationship_framing() {
        // "correlation" contains neither "relate" nor "relationship", so it
        // must not pull in the violin framing or the lifeboat addendum.
        let analysis =
            analyze(&sample_records(), "Is there a correlation in fares?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Bar);
        assert!(!analysis.summary.contains("lifeboats"));
        assert!(!analysis.summary.contains("Passengers who survived paid"));
    }

    #[test]
    fn test_distribution_framing_is_kde() {
        let analysis =
            analyze(&sample_records(), "What was the spread of ticket prices?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Kde);
        assert_eq!(analysis.title, "Fare Distribution of Titanic Passengers");
        assert_eq!(analysis.payload.columns(), ["Fare"]);
        assert_eq!(analysis.payload.rows().len(), 10);
    }
}
