//! Chat-completion client.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol. One request per
//! call, no retries.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GuideConfig;
use crate::{GuideError, Result};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A prompt sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// Conversation so far
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
}

/// Text generation backend.
#[async_trait]
pub trait GuideClient: Send + Sync {
    /// Return the text of the first completion choice.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// First choice's content from a raw completion body.
pub(crate) fn first_choice(body: &str) -> Result<String> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(GuideError::EmptyCompletion)
}

/// HTTP client for an OpenAI-compatible chat-completion API.
#[derive(Clone)]
pub struct ChatCompletionClient {
    /// HTTP client
    client: Client,

    /// Endpoint and credentials
    config: GuideConfig,
}

impl ChatCompletionClient {
    /// Create a new client.
    pub fn new(config: GuideConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GuideClient for ChatCompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or(GuideError::MissingApiKey)?;

        debug!(
            "Sending chat completion to {} ({} messages)",
            self.config.api_url,
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GuideError::Api {
                status: status.as_u16(),
                body,
            });
        }

        first_choice(&body)
    }
}
