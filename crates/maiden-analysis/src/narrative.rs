//! Markdown narrative rendering.
//!
//! Wraps a computed summary with a per-intent heading, a fixed historical
//! context paragraph, and follow-up question suggestions. Only the summary
//! carries computed numbers; everything else here is static prose, so the
//! rendered narrative is deterministic given the intent and summary.

use crate::intent::AnalysisIntent;

/// A suggested follow-up question, omitted when it matches the intent that
/// was just answered.
const FOLLOWUPS: &[(AnalysisIntent, &str)] = &[
    (
        AnalysisIntent::Survival,
        "- What was the overall survival rate on the Titanic?\n",
    ),
    (
        AnalysisIntent::Class,
        "- How did passenger class affect survival rates?\n",
    ),
    (
        AnalysisIntent::Age,
        "- What was the age distribution of Titanic passengers?\n",
    ),
    (
        AnalysisIntent::Gender,
        "- How did gender affect survival rates?\n",
    ),
    (
        AnalysisIntent::Fare,
        "- What was the relationship between ticket price and survival?\n",
    ),
    (
        AnalysisIntent::Embarked,
        "- Did the port of embarkation affect survival rates?\n",
    ),
];

/// The Markdown heading for an intent.
#[must_use]
pub fn heading(intent: AnalysisIntent) -> &'static str {
    match intent {
        AnalysisIntent::Survival => "Survival Analysis",
        AnalysisIntent::Class => "Passenger Class Analysis",
        AnalysisIntent::Age => "Age Analysis",
        AnalysisIntent::Gender => "Gender Analysis",
        AnalysisIntent::Fare => "Fare Analysis",
        AnalysisIntent::Embarked => "Embarkation Port Analysis",
        AnalysisIntent::Correlation => "Correlation Analysis",
        AnalysisIntent::General => "Titanic Dataset Overview",
    }
}

/// The fixed historical context paragraph for an intent.
#[must_use]
pub fn context(intent: AnalysisIntent) -> &'static str {
    match intent {
        AnalysisIntent::Survival => {
            "The Titanic disaster was one of the deadliest maritime disasters in history. \
             The survival rates were significantly influenced by factors such as passenger \
             class, gender, and age. First-class passengers had better access to lifeboats, \
             and the 'women and children first' policy greatly affected survival rates by \
             gender."
        }
        AnalysisIntent::Class => {
            "The Titanic had three passenger classes, each with different accommodations \
             and ticket prices. First-class passengers were wealthy and had cabins on the \
             upper decks, closer to the lifeboats. Second-class accommodations were \
             comparable to first-class on other ships. Third-class passengers were in the \
             lower decks and had more limited access to the lifeboats during the emergency."
        }
        AnalysisIntent::Age => {
            "Age played a significant role in survival rates on the Titanic. The 'women \
             and children first' policy meant that children had a higher chance of \
             survival. However, very young children, especially infants, had lower \
             survival rates than older children. Elderly passengers also had lower \
             survival rates, possibly due to mobility issues during the evacuation."
        }
        AnalysisIntent::Gender => {
            "Gender was one of the most significant factors in determining survival rates \
             on the Titanic. The 'women and children first' policy for loading lifeboats \
             meant that women had a much higher chance of survival. This policy was more \
             strictly followed in first and second class, which is why the disparity \
             between male and female survival rates is most pronounced in those classes."
        }
        AnalysisIntent::Fare => {
            "Ticket prices varied significantly on the Titanic, reflecting the different \
             classes and accommodations. Higher fares generally corresponded to \
             first-class accommodations, which were located on the upper decks closer to \
             the lifeboats. This proximity to lifeboats, along with preferential treatment \
             during evacuation, contributed to the higher survival rates among passengers \
             who paid more for their tickets."
        }
        AnalysisIntent::Embarked => {
            "The Titanic picked up passengers at three ports: Southampton (England), \
             Cherbourg (France), and Queenstown (now Cobh, Ireland). The majority of \
             passengers boarded at Southampton, the first stop. Interestingly, passengers \
             who boarded at Cherbourg had the highest survival rate, possibly because they \
             included a higher proportion of first-class passengers. Southampton had more \
             third-class passengers, which may explain the lower survival rate for \
             passengers who embarked there."
        }
        AnalysisIntent::Correlation => {
            "Several factors were correlated with survival rates on the Titanic. The \
             strongest correlations were with passenger class, gender, and age. \
             First-class passengers, women, and children had higher survival rates. These \
             correlations reflect the evacuation procedures and social norms of the time, \
             as well as the physical layout of the ship, with first-class accommodations \
             being closer to the lifeboats."
        }
        AnalysisIntent::General => {
            "The Titanic sank on April 15, 1912, after colliding with an iceberg during \
             her maiden voyage. Of the estimated 2,224 passengers and crew aboard, more \
             than 1,500 died, making it one of the deadliest commercial peacetime maritime \
             disasters in modern history. The dataset reveals significant disparities in \
             survival rates based on factors such as passenger class, gender, and age. \
             These disparities reflect the social norms and evacuation procedures of the \
             time, particularly the 'women and children first' policy."
        }
    }
}

/// The follow-up suggestion block, skipping the intent just answered.
#[must_use]
pub fn followups(intent: AnalysisIntent) -> String {
    let mut block = String::from("## You might also be interested in:\n\n");
    for &(suggestion_intent, line) in FOLLOWUPS {
        if suggestion_intent != intent {
            block.push_str(line);
        }
    }
    block
}

/// Renders the full Markdown narrative for one answered query.
#[must_use]
pub fn render(intent: AnalysisIntent, summary: &str) -> String {
    format!(
        "# {}\n\n{summary}\n\n{}\n\n{}",
        heading(intent),
        context(intent),
        followups(intent),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let text = render(AnalysisIntent::Survival, "The overall survival rate was 38.4%.");
        assert!(text.starts_with("# Survival Analysis\n\nThe overall survival rate was 38.4%.\n\n"));
        assert!(text.contains("## You might also be interested in:\n\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_followups_omit_current_intent() {
        let block = followups(AnalysisIntent::Fare);
        assert!(!block.contains("ticket price"));
        assert!(block.contains("- How did gender affect survival rates?\n"));
        assert_eq!(block.lines().filter(|line| line.starts_with('-')).count(), 5);
    }

    #[test]
    fn test_correlation_and_general_keep_all_followups() {
        for intent in [AnalysisIntent::Correlation, AnalysisIntent::General] {
            let block = followups(intent);
            assert_eq!(
                block.lines().filter(|line| line.starts_with('-')).count(),
                6,
                "intent: {intent}"
            );
        }
    }

    #[test]
    fn test_correlation_has_dedicated_heading_and_context() {
        assert_eq!(heading(AnalysisIntent::Correlation), "Correlation Analysis");
        assert!(context(AnalysisIntent::Correlation).starts_with("Several factors"));
    }
}
