//! Ledger error kinds.

use serde::{Deserialize, Serialize};
use crate::id::{CourseId, Identifier};

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Reasons a ledger operation can be rejected.
///
/// Every variant is terminal for the call that produced it and leaves all
/// stores untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Identifier has no profile
    #[error("User {0} is not registered. Please register first.")]
    NotRegistered(Identifier),

    /// Course id is not in the catalog
    #[error("Course {0} does not exist.")]
    CourseNotFound(CourseId),

    /// Enrollment already present
    #[error("Already enrolled in course {0}.")]
    AlreadyEnrolled(CourseId),

    /// Progress reported for a course the user is not enrolled in
    #[error("You are not enrolled in course {0}.")]
    NotEnrolled(CourseId),

    /// Malformed or out-of-range input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backing store rejected an operation the service had already validated
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotRegistered(_) => ErrorKind::NotRegistered,
            LedgerError::CourseNotFound(_) => ErrorKind::CourseNotFound,
            LedgerError::AlreadyEnrolled(_) => ErrorKind::AlreadyEnrolled,
            LedgerError::NotEnrolled(_) => ErrorKind::NotEnrolled,
            LedgerError::InvalidInput(_) => ErrorKind::InvalidInput,
            LedgerError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Shorthand for an [`LedgerError::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        LedgerError::InvalidInput(msg.into())
    }
}

/// Error kind as carried in operation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotRegistered,
    CourseNotFound,
    AlreadyEnrolled,
    NotEnrolled,
    InvalidInput,
    Storage,
}

impl ErrorKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotRegistered => "NotRegistered",
            ErrorKind::CourseNotFound => "CourseNotFound",
            ErrorKind::AlreadyEnrolled => "AlreadyEnrolled",
            ErrorKind::NotEnrolled => "NotEnrolled",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Storage => "Storage",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
