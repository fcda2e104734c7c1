//! Hybrid scoring orchestration
//!
//! Runs the deterministic rule-based pass first, then attempts one LLM
//! review and folds its outcome in. LLM trouble downgrades the analysis
//! method; it is never an error to the caller.

use crate::analysis::ats_scorer::AtsScorer;
use crate::analysis::job_matcher::{JobMatcher, MatchScoreResult};
use crate::analysis::round2;
use crate::analysis::skill_analyzer::{SkillAnalyzer, SkillComparison};
use crate::config::Config;
use crate::error::{Result, ResumeScorerError};
use crate::llm::client::{LlmAnalysis, LlmBackend, LlmClient, LlmError, ReviewRequest};
use serde::{Deserialize, Serialize};

/// How the final score was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Local heuristics only; no LLM configured or the call failed.
    RuleBased,
    /// LLM review succeeded and informed the final score.
    LlmEnhanced,
    /// LLM was rate limited; local scores blended, degraded stub attached.
    LlmFallback,
}

impl std::fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AnalysisMethod::RuleBased => "rule_based",
            AnalysisMethod::LlmEnhanced => "llm_enhanced",
            AnalysisMethod::LlmFallback => "llm_fallback",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of one scoring request. Constructed fresh per call, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridResult {
    /// ATS compatibility score from the rule-based pass; identical across
    /// repeated calls regardless of LLM outcome.
    pub rule_based_score: f32,
    /// Final score in [0, 100].
    pub score: f32,
    pub analysis_method: AnalysisMethod,
    /// Always present; empty when the LLM contributed nothing.
    pub llm_analysis: LlmAnalysis,
    pub match_breakdown: MatchScoreResult,
}

/// Orchestrates ATS scoring, job matching, and the optional LLM review.
pub struct HybridScoreEngine<B = LlmClient> {
    job_matcher: JobMatcher,
    ats_scorer: AtsScorer,
    backend: Option<B>,
}

impl HybridScoreEngine<LlmClient> {
    /// Engine with the production backend when the configured API key
    /// environment variable is set; rule-based only otherwise.
    pub fn new(config: &Config) -> Result<Self> {
        let backend = LlmClient::from_env(&config.llm)?;
        Self::with_backend(config, backend)
    }
}

impl<B: LlmBackend> HybridScoreEngine<B> {
    /// Pass `None` to stay rule-based.
    pub fn with_backend(config: &Config, backend: Option<B>) -> Result<Self> {
        Ok(Self {
            job_matcher: JobMatcher::new(config.scoring.clone())?,
            ats_scorer: AtsScorer::new(),
            backend,
        })
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Score one resume against one job description.
    ///
    /// Only returns an error for empty input. The LLM step is attempted at
    /// most once; its failure shows up as a downgraded `analysis_method`.
    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<HybridResult> {
        let resume = resume_text.trim();
        let job = job_description.trim();

        if resume.is_empty() {
            return Err(ResumeScorerError::InvalidInput(
                "Resume text is empty".to_string(),
            ));
        }
        if job.is_empty() {
            return Err(ResumeScorerError::InvalidInput(
                "Job description is empty".to_string(),
            ));
        }

        // Rule-based pass always runs first and never sees the LLM outcome.
        let job_keywords = self.job_matcher.extract_keywords(job);
        let rule_based_score = self.ats_scorer.score(resume, &job_keywords);

        let match_breakdown = self.job_matcher.calculate_match_score(resume, job);
        let preliminary = match_breakdown.match_score;

        let Some(backend) = &self.backend else {
            log::debug!("No LLM backend configured; rule-based analysis only");
            return Ok(HybridResult {
                rule_based_score,
                score: preliminary,
                analysis_method: AnalysisMethod::RuleBased,
                llm_analysis: LlmAnalysis::default(),
                match_breakdown,
            });
        };

        let request = ReviewRequest {
            resume_text: resume,
            job_description: job,
            ats_score: rule_based_score,
            match_score: preliminary,
        };

        match backend.review(&request).await {
            Ok(review) => {
                let score = match review.overall_score() {
                    Some(model_score) => round2(model_score.clamp(0.0, 100.0)),
                    None => blended(rule_based_score, preliminary),
                };
                log::info!("LLM-enhanced analysis complete, score {:.2}", score);
                Ok(HybridResult {
                    rule_based_score,
                    score,
                    analysis_method: AnalysisMethod::LlmEnhanced,
                    llm_analysis: review.into_analysis(),
                    match_breakdown,
                })
            }
            Err(LlmError::RateLimited) => {
                log::warn!("LLM service rate limited; blending local scores instead");
                Ok(HybridResult {
                    rule_based_score,
                    score: blended(rule_based_score, preliminary),
                    analysis_method: AnalysisMethod::LlmFallback,
                    llm_analysis: LlmAnalysis::degraded(),
                    match_breakdown,
                })
            }
            Err(err) => {
                log::error!("LLM analysis failed: {}; using rule-based result", err);
                Ok(HybridResult {
                    rule_based_score,
                    score: preliminary,
                    analysis_method: AnalysisMethod::RuleBased,
                    llm_analysis: LlmAnalysis::default(),
                    match_breakdown,
                })
            }
        }
    }

    /// Keywords the rule-based pass scores coverage against.
    pub fn job_keywords(&self, job_description: &str) -> Vec<String> {
        self.job_matcher.extract_keywords(job_description)
    }

    pub fn compare_skills(&self, resume_text: &str, job_description: &str) -> SkillComparison {
        self.job_matcher
            .skill_analyzer()
            .compare_skills(resume_text, job_description)
    }

    /// Learning suggestions for the gaps in an existing comparison.
    pub fn skill_suggestions(&self, comparison: &SkillComparison, limit: usize) -> Vec<String> {
        let gaps = SkillAnalyzer::gap_between(&comparison.resume_skills, &comparison.job_skills);
        self.job_matcher
            .skill_analyzer()
            .skill_suggestions(&gaps, limit)
    }
}

/// Midpoint of the two local scores, used when the LLM score is unavailable.
fn blended(rule_based: f32, preliminary: f32) -> f32 {
    round2((rule_based + preliminary) / 2.0)
}
