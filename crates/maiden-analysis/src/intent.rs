//! Keyword-category intent classification.
//!
//! A query is routed to exactly one [`AnalysisIntent`] by counting, per
//! category, how many trigger substrings occur anywhere in the lower-cased
//! query. The category with the highest count wins; ties resolve to the
//! earliest category in the table's fixed enumeration order, and a query
//! matching nothing falls back to [`AnalysisIntent::General`].
//!
//! Matching is deliberately plain substring containment, not word-boundary
//! matching ("sex" inside "unisex" counts). Keyword-count tie-breaking
//! depends on this, so it must not be "fixed" to tokenized matching.
//!
//! The trigger table is an explicit value injected into the
//! [`Engine`](crate::engine::Engine) rather than a module-level singleton,
//! so tests can substitute their own tables.

use tracing::debug;

/// Keyword category scored during classification.
///
/// The declaration order here is the tie-break order; keep new categories at
/// the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Category {
    #[display("survival")]
    Survival,
    #[display("class")]
    Class,
    #[display("age")]
    Age,
    #[display("gender")]
    Gender,
    #[display("fare")]
    Fare,
    #[display("embarked")]
    Embarked,
    #[display("family")]
    Family,
    #[display("cabin")]
    Cabin,
    #[display("name")]
    Name,
    #[display("correlation")]
    Correlation,
}

impl Category {
    /// Maps the winning category to its terminal intent.
    ///
    /// Family, cabin, and name questions have no dedicated aggregation and
    /// collapse to the general overview.
    #[must_use]
    pub fn intent(self) -> AnalysisIntent {
        match self {
            Self::Survival => AnalysisIntent::Survival,
            Self::Class => AnalysisIntent::Class,
            Self::Age => AnalysisIntent::Age,
            Self::Gender => AnalysisIntent::Gender,
            Self::Fare => AnalysisIntent::Fare,
            Self::Embarked => AnalysisIntent::Embarked,
            Self::Family | Self::Cabin | Self::Name => AnalysisIntent::General,
            Self::Correlation => AnalysisIntent::Correlation,
        }
    }
}

/// Terminal analysis intent a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AnalysisIntent {
    #[display("survival")]
    Survival,
    #[display("class")]
    Class,
    #[display("age")]
    Age,
    #[display("gender")]
    Gender,
    #[display("fare")]
    Fare,
    #[display("embarked")]
    Embarked,
    /// Correlation questions classify distinctly but share the general
    /// aggregation; only their response prose differs.
    #[display("correlation")]
    Correlation,
    #[display("general")]
    General,
}

/// Ordered mapping from category to trigger substrings.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    categories: Vec<(Category, Vec<String>)>,
}

impl Default for KeywordTable {
    /// The production trigger table.
    ///
    /// Two deviations from a naive keyword list are deliberate: the embarked
    /// category carries no single-letter port codes (under substring matching
    /// `c`/`q`/`s` would match nearly every sentence), and the fare category
    /// includes `relate` and `relationship` so fare-versus-survival phrasings
    /// reach the fare analyzer, which owns the relationship narrative. The
    /// bare stem `relat` would not do: it is a substring of "correlation" and
    /// would pull correlation-worded queries into the fare category.
    fn default() -> Self {
        Self::new(vec![
            (
                Category::Survival,
                triggers(&["survival", "survived", "die", "died", "death", "alive", "dead"]),
            ),
            (
                Category::Class,
                triggers(&[
                    "class",
                    "pclass",
                    "first class",
                    "second class",
                    "third class",
                    "1st",
                    "2nd",
                    "3rd",
                ]),
            ),
            (
                Category::Age,
                triggers(&[
                    "age", "young", "old", "child", "children", "adult", "elderly", "baby",
                    "infant",
                ]),
            ),
            (
                Category::Gender,
                triggers(&[
                    "gender", "sex", "male", "female", "men", "women", "man", "woman", "boy",
                    "girl",
                ]),
            ),
            (
                Category::Fare,
                triggers(&[
                    "fare",
                    "price",
                    "ticket",
                    "cost",
                    "expensive",
                    "cheap",
                    "payment",
                    "relate",
                    "relationship",
                ]),
            ),
            (
                Category::Embarked,
                triggers(&[
                    "embarked",
                    "port",
                    "boarding",
                    "cherbourg",
                    "queenstown",
                    "southampton",
                ]),
            ),
            (
                Category::Family,
                triggers(&[
                    "family", "sibling", "spouse", "sibsp", "parent", "child", "parch",
                    "relative",
                ]),
            ),
            (
                Category::Cabin,
                triggers(&["cabin", "deck", "room", "accommodation"]),
            ),
            (
                Category::Name,
                triggers(&["name", "title", "mr", "mrs", "miss", "master", "dr", "rev"]),
            ),
            (
                Category::Correlation,
                triggers(&[
                    "correlation",
                    "related",
                    "relationship",
                    "impact",
                    "effect",
                    "influence",
                    "factor",
                ]),
            ),
        ])
    }
}

impl KeywordTable {
    /// Builds a table from an explicit category order and trigger lists.
    #[must_use]
    pub fn new(categories: Vec<(Category, Vec<String>)>) -> Self {
        Self { categories }
    }

    /// The category enumeration order used for tie-breaking.
    #[must_use]
    pub fn category_order(&self) -> Vec<Category> {
        self.categories.iter().map(|(category, _)| *category).collect()
    }

    /// Classifies a query into an analysis intent.
    ///
    /// Pure and total: identical input always yields the identical intent,
    /// and every input yields some intent.
    #[must_use]
    pub fn classify(&self, query: &str) -> AnalysisIntent {
        let query = query.to_lowercase();

        let counts = self
            .categories
            .iter()
            .map(|(category, keywords)| {
                let count = keywords
                    .iter()
                    .filter(|keyword| query.contains(keyword.as_str()))
                    .count();
                (*category, count)
            })
            .collect::<Vec<_>>();

        let max_count = counts.iter().map(|&(_, count)| count).max().unwrap_or(0);
        let intent = if max_count == 0 {
            AnalysisIntent::General
        } else {
            counts
                .iter()
                .find(|&&(_, count)| count == max_count)
                .map_or(AnalysisIntent::General, |&(category, _)| category.intent())
        };

        debug!(%intent, max_count, "classified query");
        intent
    }
}

fn triggers(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|&keyword| keyword.to_owned()).collect()
}
