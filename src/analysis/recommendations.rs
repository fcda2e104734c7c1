//! Strengths, weaknesses, and action items composed from scores and gaps

use crate::analysis::skill_analyzer::SkillComparison;
use serde::{Deserialize, Serialize};

/// Formatting follow-ups attached whenever the ATS score is below the top
/// tier, after the LLM merge so model suggestions win ties.
const FORMAT_HYGIENE_ITEMS: &[&str] = &[
    "Use consistent date formats",
    "Add more bullet points for achievements",
    "Include clear section headers",
    "Add quantifiable achievements",
];

/// Human-readable recommendation lists. Insertion order is preserved;
/// action items never repeat case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub action_items: Vec<String>,
}

pub struct RecommendationComposer;

impl RecommendationComposer {
    /// Compose recommendations from the rule-based score, the skill
    /// comparison, and any LLM-suggested improvements.
    ///
    /// The score tiers are exclusive: exactly one of the three branches
    /// contributes, with boundaries at 60 and 80.
    pub fn compose(
        comparison: &SkillComparison,
        rule_based_score: f32,
        llm_improvements: &[String],
    ) -> Recommendations {
        let mut recommendations = Recommendations::default();

        if rule_based_score >= 80.0 {
            recommendations
                .strengths
                .push("Strong ATS compatibility".to_string());
        } else if rule_based_score >= 60.0 {
            recommendations
                .strengths
                .push("Good basic ATS formatting".to_string());
            recommendations.action_items.extend([
                "Add more industry-specific keywords".to_string(),
                "Enhance section headers for better visibility".to_string(),
            ]);
        } else {
            recommendations
                .weaknesses
                .push("Needs ATS optimization".to_string());
            recommendations.action_items.extend([
                "Add relevant keywords from the job description".to_string(),
                "Improve section headers (Experience, Education, Skills)".to_string(),
                "Use bullet points for better readability".to_string(),
                "Include contact information and professional links".to_string(),
            ]);
        }

        if !comparison.matched.is_empty() {
            recommendations.strengths.push(format!(
                "Strong match in {} key skills",
                comparison.matched.len()
            ));
        }

        if !comparison.missing.is_empty() {
            recommendations.weaknesses.push(format!(
                "Missing {} relevant skills",
                comparison.missing.len()
            ));

            let focus: Vec<&str> = comparison
                .missing
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            recommendations.action_items.extend([
                format!("Consider developing: {}", focus.join(", ")),
                "Focus on acquiring the missing technical skills".to_string(),
                "Highlight transferable skills that compensate for gaps".to_string(),
            ]);
        }

        for improvement in llm_improvements {
            merge_action_item(&mut recommendations.action_items, improvement);
        }

        if rule_based_score < 80.0 {
            for item in FORMAT_HYGIENE_ITEMS {
                merge_action_item(&mut recommendations.action_items, item);
            }
        }

        recommendations
    }
}

/// Append unless an existing item already contains the candidate
/// case-insensitively.
fn merge_action_item(action_items: &mut Vec<String>, candidate: &str) {
    let candidate_lower = candidate.to_lowercase();
    let duplicate = action_items
        .iter()
        .any(|item| item.to_lowercase().contains(&candidate_lower));

    if !duplicate {
        action_items.push(candidate.to_string());
    }
}
