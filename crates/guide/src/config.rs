//! Guide configuration.

use std::time::Duration;

/// Default completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Chat-completion endpoint settings.
#[derive(Debug, Clone)]
pub struct GuideConfig {
    /// Full URL of the completions endpoint
    pub api_url: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bearer token; requests fail without one
    pub api_key: Option<String>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(60),
            api_key: None,
        }
    }
}

impl GuideConfig {
    /// Defaults with the API key taken from `GROQ_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }
}
