//! In-memory storage implementation.
//!
//! Keeps every profile in a single keyed table. Nothing survives the
//! process.

use std::collections::HashMap;
use learnpath_core::{CourseId, Identifier, Progress};
use tracing::debug;
use super::{LedgerStore, ProgressDelta, Result, StorageError};

/// One row of the user table.
#[derive(Debug, Clone, Default)]
struct UserRecord {
    /// Enrollment order; doubles as the key order of `progress`
    enrolled: Vec<CourseId>,
    progress: HashMap<CourseId, Progress>,
    total_points: u64,
}

/// HashMap-backed storage backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<Identifier, UserRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn user(&self, id: &Identifier) -> Result<&UserRecord> {
        self.users
            .get(id)
            .ok_or_else(|| StorageError::NotFound(format!("user {}", id)))
    }
}

impl LedgerStore for MemoryStore {
    fn insert_user(&mut self, id: &Identifier) -> bool {
        if self.users.contains_key(id) {
            return false;
        }
        self.users.insert(id.clone(), UserRecord::default());
        debug!("Inserted user {}", id);
        true
    }

    fn contains_user(&self, id: &Identifier) -> bool {
        self.users.contains_key(id)
    }

    fn list_users(&self) -> Vec<Identifier> {
        self.users.keys().cloned().collect()
    }

    fn insert_enrollment(&mut self, id: &Identifier, course: CourseId) -> Result<()> {
        let record = self
            .users
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(format!("user {}", id)))?;

        if record.progress.contains_key(&course) {
            return Err(StorageError::Conflict(format!(
                "user {} already enrolled in {}",
                id, course
            )));
        }

        record.enrolled.push(course);
        record.progress.insert(course, Progress::default());
        Ok(())
    }

    fn list_enrollments(&self, id: &Identifier) -> Vec<CourseId> {
        self.users
            .get(id)
            .map(|r| r.enrolled.clone())
            .unwrap_or_default()
    }

    fn load_progress(&self, id: &Identifier, course: CourseId) -> Option<Progress> {
        self.users.get(id)?.progress.get(&course).copied()
    }

    fn list_progress(&self, id: &Identifier) -> Vec<(CourseId, Progress)> {
        let Some(record) = self.users.get(id) else {
            return Vec::new();
        };
        record
            .enrolled
            .iter()
            .filter_map(|c| record.progress.get(c).map(|p| (*c, *p)))
            .collect()
    }

    fn apply_progress(
        &mut self,
        id: &Identifier,
        course: CourseId,
        delta: ProgressDelta,
    ) -> Result<(Progress, u64)> {
        // Compute everything first so a failure leaves the record untouched.
        let record = self.user(id)?;
        let current = record
            .progress
            .get(&course)
            .ok_or_else(|| StorageError::NotFound(format!("progress {}/{}", id, course)))?;

        let overflow = |what: &str| StorageError::Overflow(format!("{} for {}/{}", what, id, course));
        let updated = Progress {
            lessons_completed: current
                .lessons_completed
                .checked_add(delta.lessons)
                .ok_or_else(|| overflow("lessons"))?,
            quizzes_passed: current
                .quizzes_passed
                .checked_add(delta.quizzes)
                .ok_or_else(|| overflow("quizzes"))?,
            points: current
                .points
                .checked_add(delta.points)
                .ok_or_else(|| overflow("course points"))?,
        };
        let total = record
            .total_points
            .checked_add(delta.points)
            .ok_or_else(|| overflow("total points"))?;

        let record = self
            .users
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(format!("user {}", id)))?;
        record.progress.insert(course, updated);
        record.total_points = total;

        Ok((updated, total))
    }

    fn total_points(&self, id: &Identifier) -> Option<u64> {
        self.users.get(id).map(|r| r.total_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::new(s)
    }

    #[test]
    fn test_insert_user_is_idempotent() {
        let mut store = MemoryStore::new();
        assert!(store.insert_user(&id("alice")));
        assert!(!store.insert_user(&id("alice")));
        assert!(store.contains_user(&id("alice")));
        assert_eq!(store.total_points(&id("alice")), Some(0));
        assert_eq!(store.list_users().len(), 1);
    }

    #[test]
    fn test_enrollment_creates_zeroed_progress() {
        let mut store = MemoryStore::new();
        store.insert_user(&id("alice"));
        store.insert_enrollment(&id("alice"), CourseId::new(2)).unwrap();
        store.insert_enrollment(&id("alice"), CourseId::new(1)).unwrap();

        assert_eq!(
            store.list_enrollments(&id("alice")),
            vec![CourseId::new(2), CourseId::new(1)]
        );
        assert_eq!(
            store.load_progress(&id("alice"), CourseId::new(1)),
            Some(Progress::default())
        );
        let listed: Vec<_> = store.list_progress(&id("alice")).into_iter().map(|(c, _)| c).collect();
        assert_eq!(listed, vec![CourseId::new(2), CourseId::new(1)]);
    }

    #[test]
    fn test_duplicate_enrollment_conflicts() {
        let mut store = MemoryStore::new();
        store.insert_user(&id("alice"));
        store.insert_enrollment(&id("alice"), CourseId::new(1)).unwrap();
        store
            .apply_progress(&id("alice"), CourseId::new(1), ProgressDelta { lessons: 1, quizzes: 0, points: 10 })
            .unwrap();

        let err = store.insert_enrollment(&id("alice"), CourseId::new(1)).unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(store.list_enrollments(&id("alice")).len(), 1);
        assert_eq!(store.load_progress(&id("alice"), CourseId::new(1)).unwrap().points, 10);
    }

    #[test]
    fn test_enrollment_requires_user() {
        let mut store = MemoryStore::new();
        let err = store.insert_enrollment(&id("ghost"), CourseId::new(1)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(!store.contains_user(&id("ghost")));
    }

    #[test]
    fn test_apply_progress_updates_record_and_total() {
        let mut store = MemoryStore::new();
        store.insert_user(&id("alice"));
        store.insert_enrollment(&id("alice"), CourseId::new(1)).unwrap();
        store.insert_enrollment(&id("alice"), CourseId::new(2)).unwrap();

        store
            .apply_progress(&id("alice"), CourseId::new(1), ProgressDelta { lessons: 2, quizzes: 1, points: 40 })
            .unwrap();
        let (progress, total) = store
            .apply_progress(&id("alice"), CourseId::new(2), ProgressDelta { lessons: 1, quizzes: 0, points: 10 })
            .unwrap();

        assert_eq!(progress.lessons_completed, 1);
        assert_eq!(total, 50);
        assert_eq!(store.total_points(&id("alice")), Some(50));
    }

    #[test]
    fn test_apply_progress_without_enrollment_fails() {
        let mut store = MemoryStore::new();
        store.insert_user(&id("alice"));
        let err = store
            .apply_progress(&id("alice"), CourseId::new(1), ProgressDelta::default())
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(store.list_progress(&id("alice")).is_empty());
    }

    #[test]
    fn test_overflow_leaves_record_unchanged() {
        let mut store = MemoryStore::new();
        store.insert_user(&id("alice"));
        store.insert_enrollment(&id("alice"), CourseId::new(1)).unwrap();
        store
            .apply_progress(&id("alice"), CourseId::new(1), ProgressDelta { lessons: u32::MAX, quizzes: 0, points: 5 })
            .unwrap();

        let err = store
            .apply_progress(&id("alice"), CourseId::new(1), ProgressDelta { lessons: 1, quizzes: 0, points: 10 })
            .unwrap_err();
        assert!(matches!(err, StorageError::Overflow(_)));

        let progress = store.load_progress(&id("alice"), CourseId::new(1)).unwrap();
        assert_eq!(progress.lessons_completed, u32::MAX);
        assert_eq!(progress.points, 5);
        assert_eq!(store.total_points(&id("alice")), Some(5));
    }
}
