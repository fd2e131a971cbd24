//! Query dispatch.

use maiden_records::RecordSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    AnalysisError,
    aggregate::{age, class, embarked, fare, gender, general, survival},
    intent::{AnalysisIntent, KeywordTable},
    narrative,
    payload::{TablePayload, VisualizationKind},
};

/// The single user-facing message substituted for any analysis failure.
pub const APOLOGY: &str = "I'm sorry, but I couldn't analyze the Titanic dataset \
     for that question. Please check the data file and try again.";

/// A fully rendered answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    /// Markdown narrative: heading, summary, context, follow-ups; or the
    /// apology message when analysis failed.
    pub summary_text: String,
    /// Chart type, `None` when analysis failed.
    pub visualization: Option<VisualizationKind>,
    /// Chart title, `None` when analysis failed.
    pub title: Option<String>,
    /// Chart payload, `None` when analysis failed.
    pub payload: Option<TablePayload>,
}

/// Classifier plus dispatch table.
///
/// Stateless per call: the record set is borrowed read-only, so one engine
/// can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    keywords: KeywordTable,
}

impl Engine {
    /// Creates an engine with a custom trigger table.
    #[must_use]
    pub fn new(keywords: KeywordTable) -> Self {
        Self { keywords }
    }

    /// Classifies the query without running any aggregation.
    #[must_use]
    pub fn classify(&self, query: &str) -> AnalysisIntent {
        self.keywords.classify(query)
    }

    /// Answers a query, propagating aggregation failures.
    ///
    /// Correlation questions have no dedicated aggregation and run the
    /// general overview; their narrative framing is what differs.
    pub fn analyze(
        &self,
        records: &RecordSet,
        query: &str,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let intent = self.keywords.classify(query);
        debug!(%intent, "dispatching query");

        let analysis = match intent {
            AnalysisIntent::Survival => survival::analyze(records, query),
            AnalysisIntent::Class => class::analyze(records, query),
            AnalysisIntent::Age => age::analyze(records, query),
            AnalysisIntent::Gender => gender::analyze(records, query),
            AnalysisIntent::Fare => fare::analyze(records, query),
            AnalysisIntent::Embarked => embarked::analyze(records, query),
            AnalysisIntent::Correlation | AnalysisIntent::General => {
                general::analyze(records, query)
            }
        }?;

        Ok(AnalysisResponse {
            summary_text: narrative::render(intent, &analysis.summary),
            visualization: Some(analysis.visualization),
            title: Some(analysis.title),
            payload: Some(analysis.payload),
        })
    }

    /// Answers a query, converting any failure into the apology response.
    ///
    /// No partial responses: a failed aggregation yields no visualization
    /// fields at all.
    #[must_use]
    pub fn respond(&self, records: &RecordSet, query: &str) -> AnalysisResponse {
        self.analyze(records, query).unwrap_or_else(|err| {
            warn!(%err, "analysis failed");
            AnalysisResponse {
                summary_text: APOLOGY.to_owned(),
                visualization: None,
                title: None,
                payload: None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::testutil::{lone_survivor, sample_records},
        payload::Cell,
    };

    #[test]
    fn test_survival_rate_by_class_scenario() {
        let engine = Engine::default();
        let response = engine
            .analyze(&sample_records(), "What was the survival rate by class?")
            .unwrap();
        assert_eq!(response.visualization, Some(VisualizationKind::Bar));
        assert_eq!(
            response.title.as_deref(),
            Some("Survival Rate by Passenger Class")
        );
        // Overall plus all three per-class rates, one decimal place.
        for number in ["40.0%", "66.7%", "33.3%", "25.0%"] {
            assert!(response.summary_text.contains(number), "missing {number}");
        }
        assert!(response.summary_text.starts_with("# Survival Analysis\n\n"));
    }

    #[test]
    fn test_age_distribution_scenario() {
        let engine = Engine::default();
        let response = engine
            .analyze(&sample_records(), "Show me the age distribution")
            .unwrap();
        assert_eq!(response.visualization, Some(VisualizationKind::Histogram));
        let payload = response.payload.unwrap();
        // Unsplit ages: one column, one row per passenger.
        assert_eq!(payload.columns(), ["Age"]);
        assert_eq!(payload.rows().len(), 10);
    }

    #[test]
    fn test_fare_relate_to_survival_scenario() {
        let engine = Engine::default();
        let response = engine
            .analyze(&sample_records(), "How does fare relate to survival?")
            .unwrap();
        assert_eq!(response.visualization, Some(VisualizationKind::Violin));
        assert!(response.summary_text.starts_with("# Fare Analysis\n\n"));
        assert!(response.summary_text.contains(
            "There appears to be a correlation between ticket prices and survival rates."
        ));
        assert!(response.summary_text.contains("access to lifeboats"));
    }

    #[test]
    fn test_unmatched_query_scenario() {
        let engine = Engine::default();
        let response = engine.analyze(&sample_records(), "hello").unwrap();
        assert_eq!(response.visualization, Some(VisualizationKind::Heatmap));
        assert!(response.summary_text.starts_with("# Titanic Dataset Overview\n\n"));
        // All six follow-ups are listed for the general intent.
        let followup_lines = response
            .summary_text
            .lines()
            .filter(|line| line.starts_with("- "))
            .count();
        assert_eq!(followup_lines, 6);
    }

    #[test]
    fn test_classifies_correlation_and_falls_back_to_general_aggregation() {
        let engine = Engine::default();
        let records = sample_records();
        assert_eq!(
            engine.classify("What factors influenced the outcome?"),
            AnalysisIntent::Correlation
        );

        let correlation = engine
            .analyze(&records, "What factors influenced the outcome?")
            .unwrap();
        let general = engine.analyze(&records, "hello").unwrap();

        // Same aggregation, different narrative.
        assert_eq!(correlation.payload, general.payload);
        assert_eq!(correlation.visualization, general.visualization);
        assert!(correlation.summary_text.starts_with("# Correlation Analysis\n\n"));
        assert!(correlation
            .summary_text
            .contains("Several factors were correlated with survival rates"));
    }

    #[test]
    fn test_repeated_analysis_is_byte_identical() {
        let engine = Engine::default();
        let records = sample_records();
        for query in [
            "What was the survival rate by class?",
            "Show me the age distribution",
            "How does fare relate to survival?",
            "hello",
        ] {
            let first = engine.analyze(&records, query).unwrap();
            let second = engine.analyze(&records, query).unwrap();
            assert_eq!(first.summary_text, second.summary_text, "query: {query}");
            assert_eq!(first, second, "query: {query}");
        }
    }

    #[test]
    fn test_respond_converts_failure_to_apology() {
        let engine = Engine::default();
        let response = engine.respond(&lone_survivor(), "What was the survival rate?");
        assert_eq!(response.summary_text, APOLOGY);
        assert_eq!(response.visualization, None);
        assert_eq!(response.title, None);
        assert_eq!(response.payload, None);
    }

    #[test]
    fn test_respond_passes_success_through() {
        let engine = Engine::default();
        let response = engine.respond(&sample_records(), "How many men and women were aboard?");
        assert!(response.summary_text.starts_with("# Gender Analysis\n\n"));
        assert_eq!(
            response.payload.unwrap().rows()[0],
            vec![Cell::from("male"), Cell::Int(6)]
        );
    }

    #[test]
    fn test_gender_survival_tie_routes_to_survival() {
        // One survival keyword and one gender keyword tie; survival is the
        // earlier category, and the gender word then picks the framing.
        let engine = Engine::default();
        let response = engine
            .analyze(&sample_records(), "Which gender survived more?")
            .unwrap();
        assert!(response.summary_text.starts_with("# Survival Analysis\n\n"));
        assert_eq!(response.title.as_deref(), Some("Survival Rate by Gender"));
    }
}
