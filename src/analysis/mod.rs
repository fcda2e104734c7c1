//! Scoring pipeline: taxonomy matching, job matching, and hybrid orchestration

pub mod ats_scorer;
pub mod engine;
pub mod job_matcher;
pub mod recommendations;
pub mod skill_analyzer;
pub mod taxonomy;
pub mod text_processor;

/// Scores are reported with two decimal places throughout.
pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
