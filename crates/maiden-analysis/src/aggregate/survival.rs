//! Survival-rate analysis.

use maiden_records::RecordSet;

use crate::{
    AnalysisError,
    aggregate::{overall_survival_rate, pick_framing, survival_rate_by_class, survival_rate_by_sex, survival_rate_by_port},
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Framing {
    ByClass,
    BySex,
    ByPort,
    Overall,
}

/// Sub-intent framings, first match wins: "survival by class" outranks the
/// gender and port framings because class is listed first.
const FRAMINGS: &[(&[&str], Framing)] = &[
    (&["class"], Framing::ByClass),
    (&["gender", "sex"], Framing::BySex),
    (&["embarked", "port"], Framing::ByPort),
];

/// Analyzes survival rates, overall and grouped.
///
/// The summary always reports the overall rate, the per-class breakdown,
/// and the male/female breakdown, whatever the chart framing; all of those
/// groups must therefore be populated.
pub fn analyze(records: &RecordSet, query: &str) -> Result<Analysis, AnalysisError> {
    let overall = overall_survival_rate(records)?;
    let by_class = survival_rate_by_class(records)?;
    let by_sex = survival_rate_by_sex(records)?;

    let query_lower = query.to_lowercase();
    let (payload, visualization, title) =
        match pick_framing(&query_lower, FRAMINGS, Framing::Overall) {
            Framing::ByClass => {
                let mut payload = TablePayload::new(["Passenger Class", "Survival Rate (%)"]);
                for (class, rate) in (1i64..).zip(by_class) {
                    payload.push_row([Cell::Int(class), Cell::Float(rate)]);
                }
                (payload, VisualizationKind::Bar, "Survival Rate by Passenger Class")
            }
            Framing::BySex => {
                let mut payload = TablePayload::new(["Sex", "Survival Rate (%)"]);
                payload.push_row([Cell::from("female"), Cell::Float(by_sex.female)]);
                payload.push_row([Cell::from("male"), Cell::Float(by_sex.male)]);
                (payload, VisualizationKind::Bar, "Survival Rate by Gender")
            }
            Framing::ByPort => {
                let mut payload =
                    TablePayload::new(["Port of Embarkation", "Survival Rate (%)"]);
                for (port, rate) in survival_rate_by_port(records) {
                    payload.push_row([Cell::from(port.code().to_string()), Cell::Float(rate)]);
                }
                (payload, VisualizationKind::Bar, "Survival Rate by Port of Embarkation")
            }
            Framing::Overall => {
                let mut payload = TablePayload::new(["Status", "Percentage"]);
                payload.push_row([Cell::from("Survived"), Cell::Float(overall)]);
                payload.push_row([Cell::from("Did not survive"), Cell::Float(100.0 - overall)]);
                (payload, VisualizationKind::Pie, "Overall Survival Rate")
            }
        };

    let summary = format!(
        "The overall survival rate was {overall:.1}%. \
         First class passengers had a {:.1}% survival rate, second class had {:.1}%, \
         and third class had {:.1}%. \
         Women had a {:.1}% survival rate, while men had only {:.1}%.",
        by_class[0], by_class[1], by_class[2], by_sex.female, by_sex.male,
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
    fn test_default_framing_is_overall_pie() {
        let analysis = analyze(&sample_records(), "What was the survival rate?").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Pie);
        assert_eq!(analysis.title, "Overall Survival Rate");
        assert_eq!(analysis.payload.rows().len(), 2);
    }

    #[test]
    fn test_class_framing_beats_gender_framing() {
        let analysis =
            analyze(&sample_records(), "Survival by class and gender").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Bar);
        assert_eq!(analysis.title, "Survival Rate by Passenger Class");
    }

    #[test]
    fn test_port_framing_uses_letter_codes() {
        let analysis = analyze(&sample_records(), "Survival by port").unwrap();
        assert_eq!(analysis.title, "Survival Rate by Port of Embarkation");
        assert_eq!(analysis.payload.rows()[0][0], Cell::from("C"));
    }

    #[test]
    fn test_summary_reports_all_breakdowns() {
        let analysis = analyze(&sample_records(), "survival").unwrap();
        assert_eq!(
            analysis.summary,
            "The overall survival rate was 40.0%. \
             First class passengers had a 66.7% survival rate, second class had 33.3%, \
             and third class had 25.0%. \
             Women had a 75.0% survival rate, while men had only 16.7%."
        );
    }

    #[test]
    fn test_pie_percentages_sum_to_100() {
        let analysis = analyze(&sample_records(), "did they survive").unwrap();
        let total: f64 = analysis
            .payload
            .rows()
            .iter()
            .map(|row| match row[1] {
                Cell::Float(value) => value,
                _ => panic!("expected float cell"),
            })
            .sum();
        assert!((total - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_class_bucket_is_degenerate() {
        let err = analyze(&lone_survivor(), "survival rate").unwrap_err();
        assert_eq!(err, AnalysisError::degenerate("passenger class 1"));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let records = sample_records();
        let first = analyze(&records, "survival by gender").unwrap();
        let second = analyze(&records, "survival by gender").unwrap();
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.payload, second.payload);
    }
}
