//! Remote LLM client for an OpenAI-compatible chat-completions endpoint.
//!
//! One attempt per call, no retries: callers own the fallback policy and
//! branch on the typed [`LlmError`] outcome instead of message text.

use crate::config::LlmConfig;
use crate::error::{Result, ResumeScorerError};
use crate::llm::prompts::{PromptParams, PromptTemplates, SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by the LLM service")]
    RateLimited,

    #[error("LLM request timed out")]
    Timeout,

    #[error("Failed to parse LLM response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Everything the remote reviewer needs for one scoring call. The local
/// scores are passed as context so the model can calibrate against them.
#[derive(Debug, Clone)]
pub struct ReviewRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub ats_score: f32,
    pub match_score: f32,
}

/// Review backend seam. The engine is generic over this so tests substitute
/// deterministic fakes for the network client.
pub trait LlmBackend {
    fn review(
        &self,
        request: &ReviewRequest<'_>,
    ) -> impl std::future::Future<Output = std::result::Result<LlmReview, LlmError>> + Send;
}

/// Parsed review payload. Every field is optional on the wire; a model that
/// omits one degrades to the empty value rather than failing the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmReview {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub action_insights: Vec<String>,
    #[serde(default)]
    pub overall_impression: String,
    #[serde(default)]
    pub score_matrix: ScoreMatrix,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreMatrix {
    #[serde(default)]
    pub overall_score: Option<ScoreEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreEntry {
    pub score: f32,
    #[serde(default)]
    pub analysis: String,
}

impl LlmReview {
    /// Raw model score, if the matrix carried one. Callers clamp.
    pub fn overall_score(&self) -> Option<f32> {
        self.score_matrix.overall_score.as_ref().map(|entry| entry.score)
    }

    pub fn into_analysis(self) -> LlmAnalysis {
        LlmAnalysis {
            strengths: self.strengths,
            improvement_areas: self.improvement_areas,
            action_insights: self.action_insights,
            overall_impression: self.overall_impression,
        }
    }
}

/// Qualitative analysis carried in the final result. Always present there;
/// empty (not null) when the LLM contributed nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmAnalysis {
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub action_insights: Vec<String>,
    pub overall_impression: String,
}

impl LlmAnalysis {
    /// Fixed stub reported when the service rate-limits the request.
    pub fn degraded() -> Self {
        Self {
            strengths: vec![
                "Processed without enhanced AI analysis due to rate limiting".to_string(),
            ],
            improvement_areas: vec![
                "Consider trying again later for enhanced analysis".to_string(),
            ],
            action_insights: vec!["Continue with basic analysis for now".to_string()],
            overall_impression:
                "Analysis completed with limited AI enhancement due to service limitations"
                    .to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.improvement_areas.is_empty()
            && self.action_insights.is_empty()
            && self.overall_impression.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Production backend speaking the OpenAI chat-completions dialect
/// (the Groq endpoint by default).
pub struct LlmClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    templates: PromptTemplates,
}

impl LlmClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ResumeScorerError::LlmService(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            templates: PromptTemplates::default(),
        })
    }

    /// Build a client from config, reading the API key from the configured
    /// environment variable. `Ok(None)` when the key is absent, so callers
    /// can run rule-based only.
    pub fn from_env(config: &LlmConfig) -> Result<Option<Self>> {
        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(Self::new(config, key)?)),
            _ => Ok(None),
        }
    }
}

impl LlmBackend for LlmClient {
    async fn review(
        &self,
        request: &ReviewRequest<'_>,
    ) -> std::result::Result<LlmReview, LlmError> {
        let user_prompt = self.templates.render_review(&PromptParams {
            resume_text: request.resume_text,
            job_description: request.job_description,
            ats_score: request.ats_score,
            match_score: request.match_score,
        });

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletion =
            response.json().await.map_err(classify_transport_error)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        log::debug!("LLM review returned {} bytes", content.len());

        parse_review(&content)
    }
}

/// Client-enforced timeouts get their own variant; everything else stays a
/// transport error.
fn classify_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Http(err)
    }
}

/// Parse model output into a review, tolerating code fences around the JSON.
pub fn parse_review(text: &str) -> std::result::Result<LlmReview, LlmError> {
    let cleaned = strip_json_fences(text);
    serde_json::from_str(cleaned).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
