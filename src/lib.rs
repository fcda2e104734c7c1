//! Resume scorer library
//!
//! Hybrid scoring pipeline: deterministic ATS heuristics and keyword/skill
//! matching, optionally augmented by a remote LLM review with graceful
//! degradation when the service is unavailable.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
