//! Query analysis engine for the Maiden passenger dataset.
//!
//! This crate turns a free-text question about the Titanic passenger dataset
//! into a complete answer: a statistical aggregation, a visualization
//! descriptor for the external chart renderer, and deterministic
//! natural-language prose with the computed numbers interpolated.
//!
//! # Pipeline
//!
//! ```text
//! query text
//!   │
//!   ▼
//! intent classifier ─── keyword-category scoring ([`intent`])
//!   │
//!   ▼
//! aggregation function ─ per-intent statistics + framing ([`aggregate`])
//!   │
//!   ▼
//! text generator ─────── headings, context prose, follow-ups ([`narrative`])
//!   │
//!   ▼
//! [`engine::AnalysisResponse`]
//! ```
//!
//! The engine is stateless and side-effect-free per call; a shared
//! [`maiden_records::RecordSet`] may be used from any number of threads.
//!
//! # Examples
//!
//! ```no_run
//! use maiden_analysis::engine::Engine;
//! use maiden_records::dataset::RecordSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = RecordSet::from_csv_path("data/titanic.csv".as_ref())?;
//! let engine = Engine::default();
//!
//! let response = engine.respond(&records, "What was the survival rate by class?");
//! println!("{}", response.summary_text);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod engine;
pub mod intent;
pub mod narrative;
pub mod payload;
pub mod profile;

/// Errors raised by aggregation functions.
///
/// Both variants are fatal for the query that triggered them; the dispatcher
/// converts them into a single apology response rather than emitting partial
/// results or NaN-laden prose.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    /// The record set contains no passengers at all.
    #[display("dataset is empty")]
    EmptyDataset,
    /// A rate or mean was requested over an empty group.
    #[display("cannot aggregate over empty group: {group}")]
    DegenerateAggregation { group: String },
}

impl AnalysisError {
    pub(crate) fn degenerate(group: impl Into<String>) -> Self {
        Self::DegenerateAggregation {
            group: group.into(),
        }
    }
}
