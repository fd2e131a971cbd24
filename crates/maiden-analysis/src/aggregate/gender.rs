//! Gender distribution analysis.

use maiden_records::{RecordSet, passenger::Sex};
use maiden_stats::grouping::percentage;

use crate::{
    AnalysisError,
    aggregate::{SURVIVAL_TRIGGERS, mentions_any, survival_rate_by_sex},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

/// Analyzes the gender split and male/female survival rates.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let male_count = records.iter().filter(|record| record.sex == Sex::Male).count();
    let female_count = records.len() - male_count;
    let male_percent = (male_count > 0)
        .then(|| percentage(male_count, records.len()))
        .flatten()
        .ok_or_else(|| AnalysisError::degenerate("male passengers"))?;
    let female_percent = (female_count > 0)
        .then(|| percentage(female_count, records.len()))
        .flatten()
        .ok_or_else(|| AnalysisError::degenerate("female passengers"))?;
    let rates = survival_rate_by_sex(records)?;

    let query_lower = query.to_lowercase();
    let (payload, visualization, title) = if mentions_any(&query_lower, SURVIVAL_TRIGGERS) {
        let mut payload = TablePayload::new(["Sex", "Survival Rate (%)"]);
        payload.push_row([Cell::from("female"), Cell::Float(rates.female)]);
        payload.push_row([Cell::from("male"), Cell::Float(rates.male)]);
        (payload, VisualizationKind::Bar, "Survival Rate by Gender")
    } else {
        // Pie slices are ordered by descending count, sex as tie-break.
        let mut slices = [
            (Sex::Female, female_count),
            (Sex::Male, male_count),
        ];
        slices.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.to_string().cmp(&b.0.to_string())));
        let mut payload = TablePayload::new(["Sex", "Count"]);
        for (sex, count) in slices {
            payload.push_row([
                Cell::from(sex.to_string()),
                Cell::Int(count.try_into().unwrap_or(i64::MAX)),
            ]);
        }
        (
            payload,
            VisualizationKind::Pie,
            "Gender Distribution of Titanic Passengers",
        )
    };

    let summary = format!(
        "There were {male_count} male passengers ({male_percent:.1}%) \
         and {female_count} female passengers ({female_percent:.1}%). \
         The survival rate for women was {:.1}%, while for men it was only {:.1}%.",
        rates.female, rates.male,
    );

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
    use crate::aggregate::testutil::{lone_survivor, sample_records};

    #[test]
    fn test_default_framing_is_count_pie_sorted_desc() {
        let analysis = analyze(&sample_records(), "How many men and women?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Pie);
        assert_eq!(analysis.title, "Gender Distribution of Titanic Passengers");
        // Males outnumber females, so the male slice comes first.
        assert_eq!(
            analysis.payload.rows(),
            [
                vec![Cell::from("male"), Cell::Int(6)],
                vec![Cell::from("female"), Cell::Int(4)],
            ]
        );
    }

    #[test]
    fn test_survival_framing_switches_to_bar() {
        let analysis = analyze(&sample_records(), "Which gender survived more?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Bar);
        assert_eq!(analysis.title, "Survival Rate by Gender");
        assert_eq!(analysis.payload.rows()[0][0], Cell::from("female"));
    }

    #[test]
    fn test_summary_counts_and_rates() {
        let analysis = analyze(&sample_records(), "gender").unwrap();
        assert_eq!(
            analysis.summary,
            "There were 6 male passengers (60.0%) \
             and 4 female passengers (40.0%). \
             The survival rate for women was 75.0%, while for men it was only 16.7%."
        );
    }

    #[test]
    fn test_missing_sex_is_degenerate() {
        let err = analyze(&lone_survivor(), "gender").unwrap_err();
        assert_eq!(err, AnalysisError::degenerate("female passengers"));
    }
}
