//! Learning paths and progress comparisons returned by the guide.

use serde::{Deserialize, Serialize};

/// Skill level assigned by the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl UserLevel {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Beginner => "Beginner",
            UserLevel::Intermediate => "Intermediate",
            UserLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for UserLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a suggested resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Article,
    Course,
    Video,
    #[serde(other)]
    Other,
}

/// A resource attached to a learning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
}

/// One step of a learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A learning path tailored to a user's level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub user_level: UserLevel,
    pub summary: String,
    pub learning_path: Vec<PathStep>,
    #[serde(default)]
    pub next_steps: String,
}

/// Comparison of a user's standing against the next level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressComparison {
    pub current_level: UserLevel,
    pub target_level: UserLevel,
    pub progress_summary: String,
    pub remaining_steps: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub recommended_actions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_path_parse() {
        let raw = r#"{
            "user_level": "Intermediate",
            "summary": "Build on the basics",
            "learning_path": [
                {"step": 1, "title": "Ownership", "description": "Read the book",
                 "resources": [{"type": "Article", "title": "The Book", "url": "https://example.com"},
                               {"type": "Podcast", "title": "Talk", "url": "https://example.com/p"}]}
            ],
            "next_steps": "Write a CLI"
        }"#;
        let path: LearningPath = serde_json::from_str(raw).unwrap();
        assert_eq!(path.user_level, UserLevel::Intermediate);
        assert_eq!(path.learning_path[0].resources[1].kind, ResourceKind::Other);
    }

    #[test]
    fn test_comparison_parse() {
        let raw = r#"{
            "current_level": "Beginner",
            "target_level": "Intermediate",
            "progress_summary": "Finished two courses",
            "remaining_steps": "Pass the quizzes"
        }"#;
        let cmp: ProgressComparison = serde_json::from_str(raw).unwrap();
        assert_eq!(cmp.target_level, UserLevel::Intermediate);
        assert!(cmp.challenges.is_empty());
    }

    #[test]
    fn test_unknown_level_rejected() {
        let raw = r#"{"current_level": "Expert", "target_level": "Advanced",
                      "progress_summary": "", "remaining_steps": ""}"#;
        assert!(serde_json::from_str::<ProgressComparison>(raw).is_err());
    }
}
