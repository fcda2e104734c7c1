//! Job description keyword extraction and composite match scoring

use crate::analysis::round2;
use crate::analysis::skill_analyzer::SkillAnalyzer;
use crate::analysis::text_processor::TextProcessor;
use crate::config::ScoringConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Scores a resume against a job description from three signals: keyword
/// overlap, lexical similarity, and taxonomy skill match.
pub struct JobMatcher {
    text_processor: TextProcessor,
    skill_analyzer: SkillAnalyzer,
    weights: ScoringConfig,
}

/// Composite match score breakdown. Every score is in [0, 100] with two
/// decimal places; the whole struct is reproducible from the two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScoreResult {
    pub keyword_similarity: f32,
    pub text_similarity: f32,
    pub skill_match: f32,
    pub match_score: f32,
    /// Extracted job keywords found in the resume, in extraction order.
    pub matched_keywords: Vec<String>,
}

impl JobMatcher {
    pub fn new(weights: ScoringConfig) -> Result<Self> {
        Ok(Self {
            text_processor: TextProcessor::new(),
            skill_analyzer: SkillAnalyzer::new()?,
            weights,
        })
    }

    /// Significant job description terms, deduplicated in first-seen order.
    pub fn extract_keywords(&self, job_description: &str) -> Vec<String> {
        self.text_processor.extract_keywords(job_description)
    }

    /// Weighted composite of keyword, text, and skill similarity.
    ///
    /// Pure function of the two texts: no network, no randomness, no state.
    /// A keyword counts as matched when it appears as a whole token in the
    /// resume.
    pub fn calculate_match_score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> MatchScoreResult {
        let keywords = self.extract_keywords(job_description);
        let resume_tokens = self.text_processor.token_set(resume_text);

        let matched_keywords: Vec<String> = keywords
            .iter()
            .filter(|keyword| resume_tokens.contains(*keyword))
            .cloned()
            .collect();

        let keyword_similarity = if keywords.is_empty() {
            0.0
        } else {
            matched_keywords.len() as f32 / keywords.len() as f32 * 100.0
        };

        let text_similarity = self
            .text_processor
            .text_similarity(resume_text, job_description)
            * 100.0;

        let skill_match = self
            .skill_analyzer
            .compare_skills(resume_text, job_description)
            .match_percentage;

        let match_score = (self.weights.keyword_weight * keyword_similarity
            + self.weights.text_weight * text_similarity
            + self.weights.skill_weight * skill_match)
            .clamp(0.0, 100.0);

        MatchScoreResult {
            keyword_similarity: round2(keyword_similarity),
            text_similarity: round2(text_similarity),
            skill_match: round2(skill_match),
            match_score: round2(match_score),
            matched_keywords,
        }
    }

    pub fn skill_analyzer(&self) -> &SkillAnalyzer {
        &self.skill_analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> JobMatcher {
        JobMatcher::new(ScoringConfig::default()).unwrap()
    }

    const RESUME: &str = "Backend engineer. Python, Django and PostgreSQL in production. \
                          Docker deployments on AWS.";
    const JOB: &str = "Hiring a backend engineer for Python and Django services. \
                       PostgreSQL, Docker, Kubernetes and AWS infrastructure.";

    #[test]
    fn test_match_score_is_deterministic() {
        let matcher = matcher();

        let first = matcher.calculate_match_score(RESUME, JOB);
        let second = matcher.calculate_match_score(RESUME, JOB);

        assert_eq!(first, second);
    }

    #[test]
    fn test_matched_keywords_subset_of_extracted() {
        let matcher = matcher();

        let keywords = matcher.extract_keywords(JOB);
        let result = matcher.calculate_match_score(RESUME, JOB);

        for keyword in &result.matched_keywords {
            assert!(keywords.contains(keyword), "{} not extracted", keyword);
        }
    }

    #[test]
    fn test_all_scores_in_range() {
        let matcher = matcher();
        let result = matcher.calculate_match_score(RESUME, JOB);

        for score in [
            result.keyword_similarity,
            result.text_similarity,
            result.skill_match,
            result.match_score,
        ] {
            assert!((0.0..=100.0).contains(&score), "out of range: {}", score);
            assert!(score.is_finite());
        }
    }

    #[test]
    fn test_empty_job_description() {
        let matcher = matcher();
        let result = matcher.calculate_match_score(RESUME, "");

        assert_eq!(result.keyword_similarity, 0.0);
        assert_eq!(result.skill_match, 0.0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.match_score.is_finite());
    }

    #[test]
    fn test_identical_texts_max_keyword_similarity() {
        let matcher = matcher();
        let result = matcher.calculate_match_score(JOB, JOB);

        assert_eq!(result.keyword_similarity, 100.0);
        assert_eq!(result.text_similarity, 100.0);
    }

    #[test]
    fn test_weights_drive_composite() {
        let keyword_only = JobMatcher::new(ScoringConfig {
            keyword_weight: 1.0,
            text_weight: 0.0,
            skill_weight: 0.0,
        })
        .unwrap();

        let result = keyword_only.calculate_match_score(RESUME, JOB);

        assert_eq!(result.match_score, result.keyword_similarity);
    }

    #[test]
    fn test_unrelated_texts_score_low() {
        let matcher = matcher();
        let related = matcher.calculate_match_score(RESUME, JOB);
        let unrelated = matcher.calculate_match_score(
            RESUME,
            "Seeking a pastry chef with cake decoration and chocolate tempering mastery",
        );

        assert!(unrelated.match_score < related.match_score);
    }
}
