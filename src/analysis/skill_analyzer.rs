//! Taxonomy-based skill detection, comparison, and gap suggestions

use crate::analysis::round2;
use crate::analysis::taxonomy::{SkillTaxonomy, PRIORITY_CATEGORIES};
use crate::error::{Result, ResumeScorerError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Scans free text for taxonomy skills using a single Aho-Corasick pass.
///
/// Matching is case-insensitive and whole-word: a hit is kept only when the
/// characters adjacent to it are not word characters, so "javascript" never
/// produces a phantom "java" and "foo_python" does not count as "python".
/// Multi-word terms ("machine learning") must appear as a contiguous phrase.
pub struct SkillAnalyzer {
    taxonomy: SkillTaxonomy,
    matcher: AhoCorasick,
    /// Pattern id -> (category index, canonical term).
    term_slots: Vec<(usize, &'static str)>,
}

/// Skills found in one text, keyed by category. Categories with no hits are
/// omitted; terms within a category are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl SkillProfile {
    pub fn skill_count(&self) -> usize {
        self.categories.values().map(|skills| skills.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Resume-vs-job skill comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub resume_skills: SkillProfile,
    pub job_skills: SkillProfile,
    /// Job skills also present in the resume, sorted.
    pub matched: Vec<String>,
    /// Job skills absent from the resume, sorted.
    pub missing: Vec<String>,
    /// 100 * |matched| / |job skills detected|; 0.0 when the job side is empty.
    pub match_percentage: f32,
}

impl SkillAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_taxonomy(SkillTaxonomy::default())
    }

    pub fn with_taxonomy(taxonomy: SkillTaxonomy) -> Result<Self> {
        let term_slots: Vec<(usize, &'static str)> = taxonomy.terms().collect();
        let patterns: Vec<&str> = term_slots.iter().map(|(_, term)| *term).collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                ResumeScorerError::TextProcessing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            taxonomy,
            matcher,
            term_slots,
        })
    }

    /// Detect taxonomy skills in a single text.
    pub fn analyze_skills(&self, text: &str) -> SkillProfile {
        let mut profile = SkillProfile::default();

        for (category_idx, terms) in self.scan(text) {
            let name = self.taxonomy.category_name(category_idx).to_string();
            profile
                .categories
                .insert(name, terms.into_iter().map(String::from).collect());
        }

        profile
    }

    /// Compare resume skills against job skills, per category.
    ///
    /// A term appearing in two categories is matched per category
    /// independently; there is no cross-category deduplication.
    pub fn compare_skills(&self, resume_text: &str, job_text: &str) -> SkillComparison {
        let resume_skills = self.analyze_skills(resume_text);
        let job_skills = self.analyze_skills(job_text);

        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for (category, job_terms) in &job_skills.categories {
            let resume_terms: HashSet<&String> = resume_skills
                .categories
                .get(category)
                .map(|skills| skills.iter().collect())
                .unwrap_or_default();

            for term in job_terms {
                if resume_terms.contains(term) {
                    matched.push(term.clone());
                } else {
                    missing.push(term.clone());
                }
            }
        }

        matched.sort();
        missing.sort();

        let total_job_skills = matched.len() + missing.len();
        let match_percentage = if total_job_skills == 0 {
            0.0
        } else {
            round2(matched.len() as f32 / total_job_skills as f32 * 100.0)
        };

        SkillComparison {
            resume_skills,
            job_skills,
            matched,
            missing,
            match_percentage,
        }
    }

    /// Per-category job skills missing from the resume; empty categories omitted.
    pub fn skill_gap(&self, resume_text: &str, job_text: &str) -> BTreeMap<String, Vec<String>> {
        let resume = self.analyze_skills(resume_text);
        let job = self.analyze_skills(job_text);
        Self::gap_between(&resume, &job)
    }

    /// Gap between two already-computed profiles (avoids rescanning).
    pub fn gap_between(
        resume: &SkillProfile,
        job: &SkillProfile,
    ) -> BTreeMap<String, Vec<String>> {
        let mut gaps = BTreeMap::new();

        for (category, job_terms) in &job.categories {
            let resume_terms: HashSet<&String> = resume
                .categories
                .get(category)
                .map(|skills| skills.iter().collect())
                .unwrap_or_default();

            let missing: Vec<String> = job_terms
                .iter()
                .filter(|term| !resume_terms.contains(term))
                .cloned()
                .collect();

            if !missing.is_empty() {
                gaps.insert(category.clone(), missing);
            }
        }

        gaps
    }

    /// Human-readable learning suggestions for missing skills.
    ///
    /// Priority categories contribute up to two suggestions each, in the
    /// fixed priority order; remaining categories contribute one each in
    /// taxonomy order. The result is truncated to `limit`.
    pub fn skill_suggestions(
        &self,
        gaps: &BTreeMap<String, Vec<String>>,
        limit: usize,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        for category in PRIORITY_CATEGORIES {
            if let Some(missing) = gaps.get(category) {
                for skill in missing.iter().take(2) {
                    suggestions.push(format!(
                        "Consider learning {} to improve your {} skills",
                        skill,
                        category.replace('_', " ")
                    ));
                }
            }
        }

        for category in self.taxonomy.category_names() {
            if SkillTaxonomy::is_priority_category(category) {
                continue;
            }
            if let Some(missing) = gaps.get(category) {
                if let Some(skill) = missing.first() {
                    suggestions.push(format!("Consider adding {} to your skillset", skill));
                }
            }
        }

        suggestions.truncate(limit);
        suggestions
    }

    pub fn term_count(&self) -> usize {
        self.term_slots.len()
    }

    /// One automaton pass over the lowercased text, keeping boundary-clean
    /// hits grouped by category.
    fn scan(&self, text: &str) -> BTreeMap<usize, BTreeSet<&'static str>> {
        let lowered = text.to_lowercase();
        let mut hits: BTreeMap<usize, BTreeSet<&'static str>> = BTreeMap::new();

        for mat in self.matcher.find_iter(&lowered) {
            if !has_word_boundaries(&lowered, mat.start(), mat.end()) {
                continue;
            }
            let (category_idx, term) = self.term_slots[mat.pattern().as_usize()];
            hits.entry(category_idx).or_default().insert(term);
        }

        hits
    }
}

/// Word characters follow regex `\b` semantics: alphanumeric or underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match is whole-word when neither neighboring character is a word
/// character. All taxonomy terms are ASCII, so match offsets always fall on
/// UTF-8 boundaries.
fn has_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}
