//! Integration tests for the resume scorer

use resume_scorer::analysis::engine::{AnalysisMethod, HybridScoreEngine};
use resume_scorer::analysis::recommendations::RecommendationComposer;
use resume_scorer::config::OutputFormat;
use resume_scorer::llm::client::{
    LlmAnalysis, LlmBackend, LlmClient, LlmError, LlmReview, ReviewRequest, ScoreEntry, ScoreMatrix,
};
use resume_scorer::output::formatter::ReportGenerator;
use resume_scorer::output::report::ScoreReport;
use resume_scorer::Config;
use std::collections::HashSet;

const SCENARIO_RESUME: &str = "\
Jane Smith
Email: jane.smith@example.com
Phone: (555) 123-4567

Summary
Full stack engineer shipping containerized web services.

Experience
- Built Python and JavaScript services behind React frontends
- Packaged workloads with Docker and ran them on Kubernetes
- Operated AWS infrastructure for production traffic

Skills
- Python, JavaScript, React
- Docker, Kubernetes, AWS

Education
- B.S. Computer Science
";

const SCENARIO_JOB: &str = "\
Senior Platform Engineer

We need Python, JavaScript, and React expertise. The position involves
DevOps work with Docker, Kubernetes, and AWS in production, and
leadership of a small delivery group.
";

fn rule_based_engine() -> HybridScoreEngine<LlmClient> {
    HybridScoreEngine::with_backend(&Config::default(), None).unwrap()
}

fn engine_with<B: LlmBackend>(backend: B) -> HybridScoreEngine<B> {
    HybridScoreEngine::with_backend(&Config::default(), Some(backend)).unwrap()
}

struct ReviewBackend;

impl LlmBackend for ReviewBackend {
    async fn review(
        &self,
        _request: &ReviewRequest<'_>,
    ) -> std::result::Result<LlmReview, LlmError> {
        Ok(LlmReview {
            strengths: vec!["Solid container platform background".to_string()],
            improvement_areas: vec![
                // Collides with a built-in formatting follow-up
                "Add quantifiable achievements".to_string(),
                "Lead with a role-specific summary".to_string(),
            ],
            action_insights: vec!["Call out production Kubernetes scale".to_string()],
            overall_impression: "Strong platform engineering candidate".to_string(),
            score_matrix: ScoreMatrix {
                overall_score: Some(ScoreEntry {
                    score: 86.0,
                    analysis: "Well aligned with the role".to_string(),
                }),
            },
        })
    }
}

struct RateLimitedBackend;

impl LlmBackend for RateLimitedBackend {
    async fn review(
        &self,
        _request: &ReviewRequest<'_>,
    ) -> std::result::Result<LlmReview, LlmError> {
        Err(LlmError::RateLimited)
    }
}

struct OutageBackend;

impl LlmBackend for OutageBackend {
    async fn review(
        &self,
        _request: &ReviewRequest<'_>,
    ) -> std::result::Result<LlmReview, LlmError> {
        Err(LlmError::Api {
            status: 500,
            message: "internal error".to_string(),
        })
    }
}

#[tokio::test]
async fn test_scenario_surfaces_devops_and_leadership_gaps() {
    let engine = rule_based_engine();

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();
    let comparison = engine.compare_skills(SCENARIO_RESUME, SCENARIO_JOB);

    assert!(comparison.missing.contains(&"devops".to_string()));
    assert!(comparison.missing.contains(&"leadership".to_string()));
    assert!(comparison.match_percentage > 50.0);
    assert!(comparison.match_percentage < 100.0);

    // Job-side skills partition exactly into matched and missing
    assert_eq!(
        comparison.matched.len() + comparison.missing.len(),
        comparison.job_skills.skill_count()
    );

    assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
    assert!(result.score >= 0.0 && result.score <= 100.0);
    assert!(result.rule_based_score >= 0.0 && result.rule_based_score <= 100.0);
}

#[tokio::test]
async fn test_pipeline_is_deterministic() {
    let engine = rule_based_engine();

    let first = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();
    let second = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();

    assert_eq!(first.rule_based_score, second.rule_based_score);
    assert_eq!(first.score, second.score);
    assert_eq!(first.match_breakdown, second.match_breakdown);

    assert_eq!(
        engine.compare_skills(SCENARIO_RESUME, SCENARIO_JOB),
        engine.compare_skills(SCENARIO_RESUME, SCENARIO_JOB)
    );
}

#[tokio::test]
async fn test_matched_keywords_come_from_the_job_posting() {
    let engine = rule_based_engine();

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();
    let job_keywords = engine.job_keywords(SCENARIO_JOB);

    assert!(!result.match_breakdown.matched_keywords.is_empty());
    for keyword in &result.match_breakdown.matched_keywords {
        assert!(
            job_keywords.contains(keyword),
            "matched keyword not extracted from the job posting: {}",
            keyword
        );
    }
}

#[tokio::test]
async fn test_rate_limited_service_degrades_gracefully() {
    let engine = engine_with(RateLimitedBackend);

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();

    assert_eq!(result.analysis_method, AnalysisMethod::LlmFallback);

    let blended = ((result.rule_based_score + result.match_breakdown.match_score) / 2.0 * 100.0)
        .round()
        / 100.0;
    assert_eq!(result.score, blended);
    assert_eq!(result.llm_analysis, LlmAnalysis::degraded());
}

#[tokio::test]
async fn test_service_outage_keeps_rule_based_result() {
    let engine = engine_with(OutageBackend);

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();

    assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
    assert_eq!(result.score, result.match_breakdown.match_score);
    assert!(result.llm_analysis.is_empty());
}

#[tokio::test]
async fn test_full_report_with_llm_review() {
    let engine = engine_with(ReviewBackend);

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();

    assert_eq!(result.analysis_method, AnalysisMethod::LlmEnhanced);
    assert_eq!(result.score, 86.0);

    let comparison = engine.compare_skills(SCENARIO_RESUME, SCENARIO_JOB);
    let job_keywords = engine.job_keywords(SCENARIO_JOB);
    let recommendations = RecommendationComposer::compose(
        &comparison,
        result.rule_based_score,
        &result.llm_analysis.improvement_areas,
    );

    // The model repeated a built-in follow-up; it must not appear twice
    let mut seen = HashSet::new();
    for item in &recommendations.action_items {
        assert!(
            seen.insert(item.to_lowercase()),
            "duplicate action item: {}",
            item
        );
    }

    let suggestions = engine.skill_suggestions(&comparison, 5);
    let report = ScoreReport::assemble(
        result,
        comparison,
        job_keywords,
        recommendations,
        suggestions,
        12,
    );

    let generator = ReportGenerator::with_options(false, false, true, true);
    let json = generator
        .generate_report(&report, &OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["analysis_method"], "llm_enhanced");
    assert_eq!(value["match_score"], 86.0);
    assert!((value["ats_score"].as_f64().unwrap() - report.ats_score as f64).abs() < 1e-3);
    assert_eq!(
        value["llm_analysis"]["overall_impression"],
        "Strong platform engineering candidate"
    );
}

#[tokio::test]
async fn test_console_report_renders_fallback_stub() {
    let engine = engine_with(RateLimitedBackend);

    let result = engine
        .analyze_resume(SCENARIO_RESUME, SCENARIO_JOB)
        .await
        .unwrap();
    let comparison = engine.compare_skills(SCENARIO_RESUME, SCENARIO_JOB);
    let job_keywords = engine.job_keywords(SCENARIO_JOB);
    let recommendations = RecommendationComposer::compose(
        &comparison,
        result.rule_based_score,
        &result.llm_analysis.improvement_areas,
    );
    let suggestions = engine.skill_suggestions(&comparison, 5);
    let report = ScoreReport::assemble(
        result,
        comparison,
        job_keywords,
        recommendations,
        suggestions,
        7,
    );

    let generator = ReportGenerator::with_options(false, false, true, true);
    let rendered = generator
        .generate_report(&report, &OutputFormat::Console)
        .unwrap();

    assert!(rendered.contains("llm_fallback"));
    assert!(rendered.contains("Processed without enhanced AI analysis due to rate limiting"));
    assert!(rendered.contains("devops"));
    assert!(rendered.contains("leadership"));
}

#[tokio::test]
async fn test_covered_job_skills_add_no_gap_weakness() {
    // Every job skill is present, but the resume has no structure at all
    let keyword_stuffed =
        "python javascript react docker kubernetes aws devops leadership";

    let engine = rule_based_engine();

    let result = engine
        .analyze_resume(keyword_stuffed, SCENARIO_JOB)
        .await
        .unwrap();
    let comparison = engine.compare_skills(keyword_stuffed, SCENARIO_JOB);

    assert!(comparison.missing.is_empty());
    assert!((comparison.match_percentage - 100.0).abs() < f32::EPSILON);
    assert!(result.rule_based_score < 60.0);

    let recommendations =
        RecommendationComposer::compose(&comparison, result.rule_based_score, &[]);

    // The low score contributes its weakness, but no skill-gap one
    assert_eq!(recommendations.weaknesses, vec!["Needs ATS optimization"]);
    assert!(recommendations
        .strengths
        .contains(&"Strong match in 8 key skills".to_string()));
}
