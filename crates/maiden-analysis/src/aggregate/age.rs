//! Age distribution analysis.

use maiden_records::RecordSet;
use maiden_stats::descriptive::DescriptiveStats;

use crate::{
    AnalysisError,
    aggregate::{SURVIVAL_TRIGGERS, mean_of, mentions_any},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

/// Analyzes the age distribution, optionally split by survival.
///
/// The payload carries the raw age column (plus the survival flag when the
/// query mentions survival) so the renderer can bin the histogram itself.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let stats = DescriptiveStats::new(records.iter().map(|record| record.age))
        .ok_or(AnalysisError::EmptyDataset)?;

    let query_lower = query.to_lowercase();
    let by_survival = mentions_any(&query_lower, SURVIVAL_TRIGGERS);

    let mut summary = format!(
        "The average age of Titanic passengers was {:.1} years, \
         with a median of {:.1} years. \
         The youngest passenger was {:.1} years old, and the oldest was {:.1} years old. ",
        stats.mean, stats.median, stats.min, stats.max,
    );

    let (payload, title) = if by_survival {
        let survivor_mean = mean_of(
            records
                .iter()
                .filter(|record| record.survived)
                .map(|record| record.age),
        )
        .ok_or_else(|| AnalysisError::degenerate("surviving passengers"))?;
        let lost_mean = mean_of(
            records
                .iter()
                .filter(|record| !record.survived)
                .map(|record| record.age),
        )
        .ok_or_else(|| AnalysisError::degenerate("non-surviving passengers"))?;
        summary.push_str(&format!(
            "Survivors had an average age of {survivor_mean:.1} years, \
             while those who did not survive had an average age of {lost_mean:.1} years.",
        ));

        let mut payload = TablePayload::new(["Age", "Survived"]);
        for record in records {
            payload.push_row([Cell::Float(record.age), Cell::Bool(record.survived)]);
        }
        (payload, "Age Distribution by Survival Status")
    } else {
        let mut payload = TablePayload::new(["Age"]);
        for record in records {
            payload.push_row([Cell::Float(record.age)]);
        }
        (payload, "Age Distribution of Titanic Passengers")
    };

    Ok(Analysis {
        payload,
        visualization: VisualizationKind::Histogram,
        title: title.to_owned(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testutil::sample_records;

    #[test]
    fn test_default_framing_is_plain_histogram() {
        let analysis = analyze(&sample_records(), "How old were the passengers?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Histogram);
        assert_eq!(analysis.title, "Age Distribution of Titanic Passengers");
        assert_eq!(analysis.payload.columns(), ["Age"]);
        assert_eq!(analysis.payload.rows().len(), 10);
        assert_eq!(
            analysis.summary,
            "The average age of Titanic passengers was 34.5 years, \
             with a median of 32.5 years. \
             The youngest passenger was 10.0 years old, and the oldest was 60.0 years old. "
        );
    }

    #[test]
    fn test_survival_framing_adds_split_and_sentence() {
        let analysis = analyze(&sample_records(), "Did age affect who survived?").unwrap();
        assert_eq!(analysis.title, "Age Distribution by Survival Status");
        assert_eq!(analysis.payload.columns(), ["Age", "Survived"]);
        assert!(analysis.summary.ends_with(
            "Survivors had an average age of 25.0 years, \
             while those who did not survive had an average age of 40.8 years."
        ));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let empty = RecordSet::preprocess(vec![]).unwrap();
        assert_eq!(
            analyze(&empty, "age").unwrap_err(),
            AnalysisError::EmptyDataset
        );
    }
}
