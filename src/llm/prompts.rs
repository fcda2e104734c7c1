//! Prompt construction for the remote resume review call

/// System prompt pinning the reviewer role and the strict-JSON contract.
pub const SYSTEM_PROMPT: &str = "You are an expert resume reviewer and hiring consultant. \
You respond with a single valid JSON object and nothing else: no markdown, no code fences, \
no commentary outside the JSON.";

const REVIEW_TEMPLATE: &str = r#"TASK: Review the resume below against the job posting, then score the overall fit.

<RESUME>
{resume}
</RESUME>

<JOB POSTING>
{job}
</JOB POSTING>

Local heuristics already computed for context:
- ATS compatibility score: {ats_score}/100
- Preliminary match score: {match_score}/100

Respond with a JSON object in exactly this shape:
{
  "strengths": ["specific strength referencing the resume content"],
  "improvement_areas": ["specific, actionable improvement"],
  "action_insights": ["concrete next step the candidate should take"],
  "overall_impression": "two or three sentences on overall fit",
  "score_matrix": {
    "overall_score": {
      "score": 0,
      "analysis": "one sentence justifying the score"
    }
  }
}

The overall score must be a number between 0 and 100 reflecting fit for this
specific job, informed by but not bound to the local heuristics. Reference the
actual resume content, not generic advice."#;

/// Prompt templates for the review call.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub review: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            review: REVIEW_TEMPLATE.to_string(),
        }
    }
}

/// Parameters substituted into the review template.
#[derive(Debug, Clone)]
pub struct PromptParams<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub ats_score: f32,
    pub match_score: f32,
}

impl PromptTemplates {
    pub fn render_review(&self, params: &PromptParams<'_>) -> String {
        self.review
            .replace("{resume}", params.resume_text)
            .replace("{job}", params.job_description)
            .replace("{ats_score}", &format!("{:.2}", params.ats_score))
            .replace("{match_score}", &format!("{:.2}", params.match_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PromptParams<'static> {
        PromptParams {
            resume_text: "Python engineer with Docker experience",
            job_description: "Kubernetes platform role",
            ats_score: 72.5,
            match_score: 61.25,
        }
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_review(&params());

        assert!(prompt.contains("Python engineer with Docker experience"));
        assert!(prompt.contains("Kubernetes platform role"));
        assert!(prompt.contains("72.50/100"));
        assert!(prompt.contains("61.25/100"));

        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job}"));
        assert!(!prompt.contains("{ats_score}"));
        assert!(!prompt.contains("{match_score}"));
    }

    #[test]
    fn test_render_keeps_json_shape_braces() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_review(&params());

        // The JSON skeleton the model must fill stays intact
        assert!(prompt.contains("\"score_matrix\""));
        assert!(prompt.contains("\"overall_score\""));
        assert!(prompt.contains("\"overall_impression\""));
    }

    #[test]
    fn test_system_prompt_demands_bare_json() {
        assert!(SYSTEM_PROMPT.contains("JSON"));
        assert!(SYSTEM_PROMPT.contains("no code fences"));
    }
}
