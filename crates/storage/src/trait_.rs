//! Storage trait abstraction.

use learnpath_core::{CourseId, Identifier, LedgerError, Progress};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write would duplicate an existing entry
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Counter would exceed its representable range
    #[error("Overflow: {0}")]
    Overflow(String),
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Overflow(msg) => LedgerError::InvalidInput(format!("count out of range ({})", msg)),
            other => LedgerError::Storage(other.to_string()),
        }
    }
}

/// Increments applied to one progress record in a single write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressDelta {
    /// Lessons to add
    pub lessons: u32,
    /// Quizzes to add
    pub quizzes: u32,
    /// Points to add to both the course record and the running total
    pub points: u64,
}

/// Storage abstraction for ledger data.
///
/// Every mutating method is all-or-nothing: when it returns an error the
/// store is unchanged. Methods are synchronous so that a caller holding
/// `&mut` runs each read-validate-write sequence without suspension.
pub trait LedgerStore: Send + Sync {
    // === User registry ===

    /// Create an empty profile. Returns `false` if one already existed, in
    /// which case nothing is changed.
    fn insert_user(&mut self, id: &Identifier) -> bool;

    /// Whether a profile exists.
    fn contains_user(&self, id: &Identifier) -> bool;

    /// All registered identifiers, in no particular order.
    fn list_users(&self) -> Vec<Identifier>;

    // === Enrollment store ===

    /// Add an enrollment and its zeroed progress record.
    fn insert_enrollment(&mut self, id: &Identifier, course: CourseId) -> Result<()>;

    /// Enrolled courses in enrollment order. Empty for an unknown identifier.
    fn list_enrollments(&self, id: &Identifier) -> Vec<CourseId>;

    // === Progress store ===

    /// Load one progress record.
    fn load_progress(&self, id: &Identifier, course: CourseId) -> Option<Progress>;

    /// All progress records of a user in enrollment order.
    fn list_progress(&self, id: &Identifier) -> Vec<(CourseId, Progress)>;

    /// Apply a delta to a progress record and the user's total in one write.
    ///
    /// Returns the updated record and the updated total.
    fn apply_progress(
        &mut self,
        id: &Identifier,
        course: CourseId,
        delta: ProgressDelta,
    ) -> Result<(Progress, u64)>;

    // === Points ledger ===

    /// Running total, `None` for an unknown identifier.
    fn total_points(&self, id: &Identifier) -> Option<u64>;
}
