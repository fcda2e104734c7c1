//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM service error: {0}")]
    LlmService(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeScorerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeScorerError::AnalysisFailed(err.to_string())
    }
}
