//! Milestone model - lesson-count thresholds that grant bonus points.

use serde::{Deserialize, Serialize};

/// A (threshold, bonus) pair attached to a course.
///
/// The bonus is granted on the progress report that makes the course's
/// cumulative lesson count equal to `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Lesson count that triggers the bonus, must be positive
    pub threshold: u32,

    /// Extra points granted
    pub bonus_points: u32,
}

impl Milestone {
    /// Create a new milestone.
    pub const fn new(threshold: u32, bonus_points: u32) -> Self {
        Self { threshold, bonus_points }
    }

    /// Whether the lesson count lands exactly on this milestone.
    pub fn matches(&self, lessons_completed: u32) -> bool {
        lessons_completed == self.threshold
    }
}
