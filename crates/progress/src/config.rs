//! Ledger configuration: the seeded catalog and milestone table.

use std::collections::HashSet;
use std::path::Path;
use learnpath_core::{Course, CourseId, Milestone};
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a [`LedgerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two catalog entries share an id
    #[error("Duplicate course id {0} in catalog")]
    DuplicateCourse(CourseId),

    /// A seeded milestone has a zero threshold
    #[error("Milestone for course {0} has a zero threshold")]
    ZeroThreshold(CourseId),
}

/// Milestones seeded for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMilestones {
    /// Course the milestones belong to
    pub course_id: CourseId,

    /// Milestone list, kept in the given order
    pub milestones: Vec<Milestone>,
}

/// Startup configuration of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Course catalog in presentation order
    pub courses: Vec<Course>,

    /// Initial milestone table
    #[serde(default)]
    pub milestones: Vec<CourseMilestones>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            courses: vec![
                Course::new(1, "Math 101", "Introductory Mathematics"),
                Course::new(2, "History 101", "Overview of World History"),
                Course::new(3, "Computer Science 101", "Basics of Computing"),
            ],
            milestones: vec![
                CourseMilestones {
                    course_id: CourseId::new(1),
                    milestones: vec![Milestone::new(5, 50), Milestone::new(10, 100)],
                },
                CourseMilestones {
                    course_id: CourseId::new(2),
                    milestones: vec![Milestone::new(3, 30), Milestone::new(6, 70)],
                },
            ],
        }
    }
}

impl LedgerConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: LedgerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Check catalog id uniqueness and milestone thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for course in &self.courses {
            if !seen.insert(course.id) {
                return Err(ConfigError::DuplicateCourse(course.id));
            }
        }

        for entry in &self.milestones {
            if entry.milestones.iter().any(|m| m.threshold == 0) {
                return Err(ConfigError::ZeroThreshold(entry.course_id));
            }
        }

        Ok(())
    }
}
