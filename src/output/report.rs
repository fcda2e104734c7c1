//! Final report assembly

use crate::analysis::engine::{AnalysisMethod, HybridResult};
use crate::analysis::job_matcher::MatchScoreResult;
use crate::analysis::recommendations::Recommendations;
use crate::analysis::skill_analyzer::SkillComparison;
use crate::llm::client::LlmAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one scoring run produced, in the shape callers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Rule-based ATS compatibility score.
    pub ats_score: f32,

    /// Final (possibly LLM-influenced) match score.
    pub match_score: f32,

    pub analysis_method: AnalysisMethod,

    /// Skill comparison between resume and job description.
    pub skill_analysis: SkillComparison,

    /// Keywords extracted from the job description, in extraction order.
    pub job_keywords: Vec<String>,

    /// Component scores behind the preliminary match score.
    pub match_breakdown: MatchScoreResult,

    /// Qualitative LLM analysis; empty when the LLM contributed nothing.
    pub llm_analysis: LlmAnalysis,

    pub recommendations: Recommendations,

    /// Learning suggestions for missing skills.
    pub skill_suggestions: Vec<String>,

    pub generated_at: DateTime<Utc>,

    pub processing_time_ms: u64,

    pub scorer_version: String,
}

impl ScoreReport {
    pub fn assemble(
        result: HybridResult,
        skill_analysis: SkillComparison,
        job_keywords: Vec<String>,
        recommendations: Recommendations,
        skill_suggestions: Vec<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            ats_score: result.rule_based_score,
            match_score: result.score,
            analysis_method: result.analysis_method,
            skill_analysis,
            job_keywords,
            match_breakdown: result.match_breakdown,
            llm_analysis: result.llm_analysis,
            recommendations,
            skill_suggestions,
            generated_at: Utc::now(),
            processing_time_ms,
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
