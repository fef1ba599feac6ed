//! Progress model - per-course counters and the read models built from them.

use serde::{Deserialize, Serialize};
use crate::id::{CourseId, Identifier};

/// Points granted per completed lesson.
pub const LESSON_POINT_VALUE: u64 = 10;

/// Points granted per passed quiz.
pub const QUIZ_POINT_VALUE: u64 = 20;

/// Title reported for an enrolled course that is missing from the catalog.
pub const UNKNOWN_COURSE_TITLE: &str = "Unknown Course";

/// Cumulative progress of one learner in one course.
///
/// Fields only ever grow; a record is created zeroed at enrollment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Lessons completed so far
    pub lessons_completed: u32,

    /// Quizzes passed so far
    pub quizzes_passed: u32,

    /// Points accrued in this course, bonuses included
    pub points: u64,
}

/// Points earned by one progress report, before milestone bonuses.
///
/// Returns `None` when the product does not fit in the points type.
pub fn base_points(lessons: u32, quizzes: u32) -> Option<u64> {
    let lesson_points = u64::from(lessons).checked_mul(LESSON_POINT_VALUE)?;
    let quiz_points = u64::from(quizzes).checked_mul(QUIZ_POINT_VALUE)?;
    lesson_points.checked_add(quiz_points)
}

/// One row of a learner's progress listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub course_id: CourseId,
    pub title: String,
    pub lessons_completed: u32,
    pub quizzes_passed: u32,
    pub points: u64,
}

/// Profile of a learner as seen by the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Who this profile belongs to
    pub identifier: Identifier,

    /// Running points total
    pub total_points: u64,

    /// Enrolled courses in enrollment order
    pub enrolled_courses: Vec<CourseId>,
}

impl UserProfile {
    /// The profile reported for an identifier that never registered.
    pub fn empty(identifier: Identifier) -> Self {
        Self {
            identifier,
            total_points: 0,
            enrolled_courses: Vec::new(),
        }
    }
}

/// Totals and enrollments of an arbitrary identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub total_points: u64,
    pub enrolled_courses: Vec<CourseId>,
}

impl From<UserProfile> for ProfileSummary {
    fn from(profile: UserProfile) -> Self {
        Self {
            total_points: profile.total_points,
            enrolled_courses: profile.enrolled_courses,
        }
    }
}
