//! Course model - an entry in the static catalog.

use serde::{Deserialize, Serialize};
use crate::id::CourseId;

/// A course learners can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Course title
    pub title: String,

    /// Short description
    pub description: String,
}

impl Course {
    /// Create a new course.
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}
