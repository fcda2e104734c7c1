//! Rule-based ATS compatibility scoring
//!
//! Deterministic formatting and keyword-presence heuristics. Runs before and
//! independently of any LLM call, so the score is identical across repeated
//! calls with the same input.

use crate::analysis::round2;
use crate::analysis::text_processor::TextProcessor;

// Heuristic weights; they sum to 1.0 and the composite is scaled to 0-100.
// Fixed at compile time so scores stay comparable across runs.
const SECTION_WEIGHT: f32 = 0.25;
const BULLET_WEIGHT: f32 = 0.20;
const CONTACT_WEIGHT: f32 = 0.15;
const COVERAGE_WEIGHT: f32 = 0.40;

/// Fraction of non-empty lines that should carry bullets for full marks.
const BULLET_TARGET_RATIO: f32 = 0.25;

/// Section headers an ATS looks for, with accepted synonyms.
const EXPECTED_SECTIONS: &[&[&str]] = &[
    &[
        "experience",
        "work experience",
        "professional experience",
        "employment",
        "career",
    ],
    &[
        "education",
        "academic background",
        "qualifications",
        "degree",
    ],
    &[
        "skills",
        "technical skills",
        "core competencies",
        "expertise",
    ],
    &["summary", "profile", "objective", "about"],
];

const BULLET_MARKERS: &[char] = &['-', '*', '•', '●', '◦'];

pub struct AtsScorer {
    text_processor: TextProcessor,
}

impl Default for AtsScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsScorer {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
        }
    }

    /// ATS compatibility score in [0, 100], two decimal places.
    ///
    /// Combines section headers (0.25), bullet density (0.20), contact info
    /// (0.15), and job keyword coverage (0.40).
    pub fn score(&self, resume_text: &str, job_keywords: &[String]) -> f32 {
        let composite = SECTION_WEIGHT * section_score(resume_text)
            + BULLET_WEIGHT * bullet_score(resume_text)
            + CONTACT_WEIGHT * self.contact_score(resume_text)
            + COVERAGE_WEIGHT * self.coverage_score(resume_text, job_keywords);

        round2(composite * 100.0)
    }

    /// Email and phone each contribute half.
    fn contact_score(&self, text: &str) -> f32 {
        let mut score = 0.0;
        if self.text_processor.has_email(text) {
            score += 0.5;
        }
        if self.text_processor.has_phone(text) {
            score += 0.5;
        }
        score
    }

    /// Fraction of job keywords present as whole tokens in the resume.
    /// No extracted keywords counts as zero coverage.
    fn coverage_score(&self, resume_text: &str, job_keywords: &[String]) -> f32 {
        if job_keywords.is_empty() {
            return 0.0;
        }

        let resume_tokens = self.text_processor.token_set(resume_text);
        let covered = job_keywords
            .iter()
            .filter(|keyword| resume_tokens.contains(*keyword))
            .count();

        covered as f32 / job_keywords.len() as f32
    }
}

/// Fraction of expected sections with a recognizable header line.
fn section_score(text: &str) -> f32 {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    let found = EXPECTED_SECTIONS
        .iter()
        .filter(|synonyms| {
            lines
                .iter()
                .any(|line| synonyms.iter().any(|synonym| is_header_line(line, synonym)))
        })
        .count();

    found as f32 / EXPECTED_SECTIONS.len() as f32
}

/// A header line starts with the synonym, equals it, or carries it with a
/// trailing colon. Lines longer than a short title are not headers.
fn is_header_line(trimmed_lower: &str, synonym: &str) -> bool {
    if trimmed_lower.len() > 40 {
        return false;
    }

    trimmed_lower == synonym
        || trimmed_lower.starts_with(synonym)
        || (trimmed_lower.ends_with(':') && trimmed_lower.contains(synonym))
}

/// Bullet lines relative to non-empty lines, saturating at the target ratio.
fn bullet_score(text: &str) -> f32 {
    let mut non_empty = 0usize;
    let mut bullets = 0usize;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        non_empty += 1;
        if trimmed.starts_with(BULLET_MARKERS) {
            bullets += 1;
        }
    }

    if non_empty == 0 {
        return 0.0;
    }

    (bullets as f32 / non_empty as f32 / BULLET_TARGET_RATIO).min(1.0)
}
