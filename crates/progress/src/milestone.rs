//! Milestone table and bonus calculation.

use std::collections::HashMap;
use learnpath_core::{CourseId, LedgerError, Milestone};
use crate::config::CourseMilestones;

/// Per-course milestone lists.
#[derive(Debug, Clone, Default)]
pub struct MilestoneTable {
    by_course: HashMap<CourseId, Vec<Milestone>>,
}

impl MilestoneTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from seeded entries. Later entries for the same course
    /// replace earlier ones.
    pub fn from_seed(seed: impl IntoIterator<Item = CourseMilestones>) -> Self {
        let by_course = seed
            .into_iter()
            .map(|entry| (entry.course_id, entry.milestones))
            .collect();
        Self { by_course }
    }

    /// Milestones of a course, empty if none are defined.
    pub fn get(&self, course: CourseId) -> &[Milestone] {
        self.by_course.get(&course).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the whole milestone list of a course.
    ///
    /// Order and duplicate thresholds are kept as given. A zero threshold is
    /// rejected and leaves the table unchanged.
    pub fn replace(&mut self, course: CourseId, milestones: Vec<Milestone>) -> Result<(), LedgerError> {
        if let Some(pos) = milestones.iter().position(|m| m.threshold == 0) {
            return Err(LedgerError::invalid(format!(
                "milestone {} for course {} has threshold 0; thresholds must be positive",
                pos, course
            )));
        }
        self.by_course.insert(course, milestones);
        Ok(())
    }

    /// Bonus granted when a course's cumulative lesson count becomes
    /// `lessons_completed`.
    ///
    /// Only exact matches count: a report that jumps past a threshold earns
    /// nothing for it. Every matching entry contributes, duplicates included.
    pub fn calculate_bonus(&self, course: CourseId, lessons_completed: u32) -> u64 {
        self.get(course)
            .iter()
            .filter(|m| m.matches(lessons_completed))
            .map(|m| u64::from(m.bonus_points))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LedgerConfig;

    fn seeded() -> MilestoneTable {
        MilestoneTable::from_seed(LedgerConfig::default().milestones)
    }

    #[test]
    fn test_seeded_bonuses() {
        let table = seeded();
        assert_eq!(table.calculate_bonus(CourseId::new(1), 5), 50);
        assert_eq!(table.calculate_bonus(CourseId::new(1), 10), 100);
        assert_eq!(table.calculate_bonus(CourseId::new(2), 3), 30);
        assert_eq!(table.calculate_bonus(CourseId::new(2), 6), 70);
    }

    #[test]
    fn test_no_bonus_off_threshold() {
        let table = seeded();
        assert_eq!(table.calculate_bonus(CourseId::new(1), 4), 0);
        assert_eq!(table.calculate_bonus(CourseId::new(1), 6), 0);
        assert_eq!(table.calculate_bonus(CourseId::new(1), 11), 0);
    }

    #[test]
    fn test_course_without_milestones() {
        let table = seeded();
        assert!(table.get(CourseId::new(3)).is_empty());
        assert_eq!(table.calculate_bonus(CourseId::new(3), 5), 0);
    }

    #[test]
    fn test_duplicate_thresholds_each_count() {
        let mut table = MilestoneTable::new();
        table
            .replace(CourseId::new(1), vec![Milestone::new(2, 10), Milestone::new(2, 15)])
            .unwrap();
        assert_eq!(table.calculate_bonus(CourseId::new(1), 2), 25);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut table = seeded();
        table.replace(CourseId::new(1), vec![Milestone::new(7, 5)]).unwrap();

        assert_eq!(table.get(CourseId::new(1)), &[Milestone::new(7, 5)]);
        assert_eq!(table.calculate_bonus(CourseId::new(1), 5), 0);

        table.replace(CourseId::new(1), Vec::new()).unwrap();
        assert!(table.get(CourseId::new(1)).is_empty());
    }

    #[test]
    fn test_replace_keeps_given_order() {
        let mut table = MilestoneTable::new();
        let list = vec![Milestone::new(9, 1), Milestone::new(3, 2), Milestone::new(6, 3)];
        table.replace(CourseId::new(2), list.clone()).unwrap();
        assert_eq!(table.get(CourseId::new(2)), list.as_slice());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut table = seeded();
        let err = table
            .replace(CourseId::new(1), vec![Milestone::new(4, 10), Milestone::new(0, 10)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(table.get(CourseId::new(1)).len(), 2);
        assert_eq!(table.calculate_bonus(CourseId::new(1), 5), 50);
    }
}
