//! System prompts for the guide flows.

use crate::client::{ChatMessage, ChatRequest};
use crate::config::GuideConfig;

const ASPIRATION_SYSTEM: &str = "\
Your goal is to guide the user step-by-step toward clarity about their career goals.
- Start with broad open-ended questions.
- Based on their response, gradually narrow the focus.
- Keep track of what they mention and refer back to previous answers.
- Keep the conversation natural, like a real human dialogue.
- Ask one question at a time, leading them toward defining their career path.";

const QUIZ_SYSTEM: &str = r#"You generate a short multiple-choice quiz to assess a user's knowledge level.
The quiz has 3-5 questions, each with 4 answer choices, exactly one of which is correct.
Respond with valid JSON only:
{"quiz": [{"question": "What is X?", "choices": ["Option A", "Option B", "Option C", "Option D"], "correct_answer": "Option B"}]}"#;

const PATH_SYSTEM: &str = r#"You determine a user's skill level from quiz answers, then produce a learning path for that level.
Respond with valid JSON only:
{"user_level": "Beginner | Intermediate | Advanced",
 "summary": "A brief summary of the suggested learning path.",
 "learning_path": [{"step": 1, "title": "Step Title", "description": "Step Description",
                    "resources": [{"type": "Article | Course | Video", "title": "Resource Title", "url": "https://example.com"}]}],
 "next_steps": "Guidance on what the user should do next."}"#;

const COMPARE_SYSTEM: &str = r#"You compare a user's current progress against the next larger goal (for example reaching Intermediate from Beginner).
Describe gaps, achievements, and what remains.
Respond with valid JSON only:
{"current_level": "Beginner | Intermediate | Advanced",
 "target_level": "Intermediate | Advanced",
 "progress_summary": "What the user has accomplished so far.",
 "remaining_steps": "What they need to achieve next.",
 "challenges": "Potential difficulties they might face.",
 "recommended_actions": "Suggested tasks to help bridge the gap."}"#;

fn request(config: &GuideConfig, system: &str, user: String) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        temperature: config.temperature,
    }
}

/// Open-ended career guidance; the user payload is forwarded as JSON.
pub fn aspiration(config: &GuideConfig, input: &serde_json::Value) -> ChatRequest {
    request(config, ASPIRATION_SYSTEM, input.to_string())
}

/// Skill-assessment quiz for an aspiration.
pub fn quiz(config: &GuideConfig, aspiration: &str) -> ChatRequest {
    request(
        config,
        QUIZ_SYSTEM,
        format!("Create a quiz to assess the skill level of someone interested in {}.", aspiration),
    )
}

/// Learning path from quiz answers.
pub fn learning_path(config: &GuideConfig, aspiration: &str, answers: &serde_json::Value) -> ChatRequest {
    request(
        config,
        PATH_SYSTEM,
        format!(
            "Based on these quiz answers: {}, determine the user's level (Beginner, Intermediate, or Advanced). \
             Then generate a learning path for someone interested in {}.",
            answers, aspiration
        ),
    )
}

/// Comparison of the current level against the next milestone.
pub fn compare(config: &GuideConfig, level: &str, aspiration: &str) -> ChatRequest {
    request(
        config,
        COMPARE_SYSTEM,
        format!(
            "Analyze my current level ({}) in relation to achieving {}. \
             Give me a comparison to the next big milestone.",
            level, aspiration
        ),
    )
}
