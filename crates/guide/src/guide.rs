//! High-level guide flows over a [`GuideClient`].

use tracing::{debug, warn};

use crate::client::GuideClient;
use crate::config::GuideConfig;
use crate::parse::parse_completion;
use crate::path::{LearningPath, ProgressComparison};
use crate::prompts;
use crate::quiz::Quiz;
use crate::Result;

/// The four guide flows.
pub struct Guide<C: GuideClient> {
    client: C,
    config: GuideConfig,
}

impl<C: GuideClient> Guide<C> {
    /// Create a guide.
    pub fn new(client: C, config: GuideConfig) -> Self {
        Self { client, config }
    }

    /// Free-form guidance text for a user message.
    pub async fn aspiration_prompt(&self, input: &serde_json::Value) -> Result<String> {
        self.client.complete(&prompts::aspiration(&self.config, input)).await
    }

    /// Generate and validate a quiz.
    pub async fn generate_quiz(&self, aspiration: &str) -> Result<Quiz> {
        let text = self.client.complete(&prompts::quiz(&self.config, aspiration)).await?;
        let quiz: Quiz = parse_completion(&text)?;
        if let Err(e) = quiz.validate() {
            warn!("Rejected generated quiz: {}", e);
            return Err(e);
        }
        debug!("Generated quiz with {} questions", quiz.questions.len());
        Ok(quiz)
    }

    /// Generate a learning path from quiz answers.
    pub async fn generate_learning_path(
        &self,
        aspiration: &str,
        answers: &serde_json::Value,
    ) -> Result<LearningPath> {
        let text = self
            .client
            .complete(&prompts::learning_path(&self.config, aspiration, answers))
            .await?;
        parse_completion(&text)
    }

    /// Compare a level against the next milestone.
    pub async fn compare_progress(&self, level: &str, aspiration: &str) -> Result<ProgressComparison> {
        let text = self
            .client
            .complete(&prompts::compare(&self.config, level, aspiration))
            .await?;
        parse_completion(&text)
    }
}
