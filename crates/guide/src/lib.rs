//! Learning guide over a chat-completion API.
//!
//! Builds prompts for aspiration guidance, skill quizzes, learning paths and
//! progress comparisons, and turns model output into validated types. This
//! crate holds no ledger state.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod guide;
pub mod parse;
pub mod path;
pub mod prompts;
pub mod quiz;

pub use client::{GuideClient, ChatCompletionClient, ChatRequest, ChatMessage, Role};
pub use config::GuideConfig;
pub use guide::Guide;
pub use path::{LearningPath, PathStep, Resource, ResourceKind, ProgressComparison, UserLevel};
pub use quiz::{Quiz, QuizQuestion, QuizOutcome};

/// Result type for guide operations.
pub type Result<T> = std::result::Result<T, GuideError>;

/// Errors from the chat-completion boundary.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No API key configured
    #[error("No API key configured (set GROQ_API_KEY)")]
    MissingApiKey,

    /// Completion had no usable content
    #[error("Completion returned no content")]
    EmptyCompletion,

    /// Quiz or answers failed validation
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),
}
