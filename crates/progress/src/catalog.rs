//! Static course catalog.

use std::collections::HashSet;
use learnpath_core::{Course, CourseId};
use crate::config::{ConfigError, LedgerConfig};

/// Immutable, ordered list of available courses.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(courses: Vec<Course>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.id) {
                return Err(ConfigError::DuplicateCourse(course.id));
            }
        }
        Ok(Self { courses })
    }

    /// The built-in three-course catalog.
    pub fn seeded() -> Self {
        Self {
            courses: LedgerConfig::default().courses,
        }
    }

    /// All courses in catalog order.
    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    /// Find a course by id.
    pub fn find(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Whether a course id is in the catalog.
    pub fn exists(&self, id: CourseId) -> bool {
        self.find(id).is_some()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
