//! General dataset overview.

use maiden_records::{RecordSet, passenger::Sex};
use maiden_stats::{
    descriptive::DescriptiveStats,
    grouping::{GroupRate, group_rates, percentage},
};

use crate::{
    AnalysisError,
    aggregate::overall_survival_rate,
    payload::{Analysis, Cell, TablePayload, VisualizationKind},
};

/// Survival rate per (class, sex) pair; all six groups must be populated.
fn survival_by_class_and_sex(records: &RecordSet) -> Result<[[f64; 2]; 3], AnalysisError> {
    let rates = group_rates(
        records
            .iter()
            .map(|record| ((record.pclass, record.sex), record.survived)),
    );
    let mut grid = [[0.0; 2]; 3];
    for class in 1..=3u8 {
        for (column, sex) in [Sex::Female, Sex::Male].into_iter().enumerate() {
            grid[usize::from(class) - 1][column] = rates
                .get(&(class, sex))
                .and_then(GroupRate::rate_percent)
                .ok_or_else(|| {
                    AnalysisError::degenerate(format!("{sex} passengers in class {class}"))
                })?;
        }
    }
    Ok(grid)
}

/// Produces the whole-dataset overview: headcounts, class split, age
/// profile, and the class-by-gender survival heatmap.
///
/// Serves both general questions and, via the engine, correlation
/// questions.
pub fn analyze(records: &RecordSet, _query: &str) -> Result<Analysis, AnalysisError> {
    let total = records.len();
    let survival_rate = overall_survival_rate(records)?;

    let male_count = records.iter().filter(|record| record.sex == Sex::Male).count();
    let female_count = total - male_count;
    let male_percent = (male_count > 0)
        .then(|| percentage(male_count, total))
        .flatten()
        .ok_or_else(|| AnalysisError::degenerate("male passengers"))?;
    let female_percent = (female_count > 0)
        .then(|| percentage(female_count, total))
        .flatten()
        .ok_or_else(|| AnalysisError::degenerate("female passengers"))?;

    let mut class_percent = [0.0; 3];
    for class in 1..=3u8 {
        let count = records.iter().filter(|record| record.pclass == class).count();
        class_percent[usize::from(class) - 1] = (count > 0)
            .then(|| percentage(count, total))
            .flatten()
            .ok_or_else(|| AnalysisError::degenerate(format!("passenger class {class}")))?;
    }

    let ages = DescriptiveStats::new(records.iter().map(|record| record.age))
        .ok_or(AnalysisError::EmptyDataset)?;
    let grid = survival_by_class_and_sex(records)?;

    let mut payload = TablePayload::new(["Passenger Class", "female", "male"]);
    for (class, row) in (1i64..).zip(grid) {
        payload.push_row([Cell::Int(class), Cell::Float(row[0]), Cell::Float(row[1])]);
    }

    let summary = format!(
        "The Titanic had {total} passengers, with an overall survival rate of \
         {survival_rate:.1}%. \
         There were {male_count} men ({male_percent:.1}%) and \
         {female_count} women ({female_percent:.1}%). \
         The passengers were divided into first class ({:.1}%), \
         second class ({:.1}%), and third class ({:.1}%). \
         The average age was {:.1} years, with a median of {:.1} years.",
        class_percent[0], class_percent[1], class_percent[2], ages.mean, ages.median,
    );

    Ok(Analysis {
        payload,
        visualization: VisualizationKind::Heatmap,
        title: "Survival Rate by Class and Gender".to_owned(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testutil::{lone_survivor, sample_records};

    #[test]
    fn test_overview_summary() {
        let analysis = analyze(&sample_records(), "Tell me about the Titanic").unwrap();
        assert_eq!(
            analysis.summary,
            "The Titanic had 10 passengers, with an overall survival rate of 40.0%. \
             There were 6 men (60.0%) and 4 women (40.0%). \
             The passengers were divided into first class (30.0%), \
             second class (30.0%), and third class (40.0%). \
             The average age was 34.5 years, with a median of 32.5 years."
        );
    }

    #[test]
    fn test_heatmap_payload_shape() {
        let analysis = analyze(&sample_records(), "overview").unwrap();
        assert_eq!(analysis.visualization, VisualizationKind::Heatmap);
        assert_eq!(analysis.title, "Survival Rate by Class and Gender");
        assert_eq!(analysis.payload.columns(), ["Passenger Class", "female", "male"]);
        assert_eq!(
            analysis.payload.rows(),
            [
                vec![Cell::Int(1), Cell::Float(100.0), Cell::Float(50.0)],
                vec![Cell::Int(2), Cell::Float(100.0), Cell::Float(0.0)],
                vec![Cell::Int(3), Cell::Float(50.0), Cell::Float(0.0)],
            ]
        );
    }

    #[test]
    fn test_query_text_does_not_change_result() {
        let records = sample_records();
        let first = analyze(&records, "overview").unwrap();
        let second = analyze(&records, "something else entirely").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_heatmap_cell_is_degenerate() {
        let err = analyze(&lone_survivor(), "overview").unwrap_err();
        assert_eq!(err, AnalysisError::degenerate("female passengers"));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let empty = RecordSet::preprocess(vec![]).unwrap();
        assert_eq!(
            analyze(&empty, "overview").unwrap_err(),
            AnalysisError::EmptyDataset
        );
    }
}
