//! LearnPath core data models.
//!
//! This crate defines the data structures shared by the progress ledger:
//! courses, per-course progress, milestones, and the structured results
//! returned by ledger operations.

#![warn(missing_docs)]

// Core identities
mod id;

// Catalog and progress
mod course;
mod progress;
mod milestone;

// Results and errors
mod error;
mod outcome;

// Re-exports
pub use id::*;

pub use course::Course;
pub use progress::{
    Progress, ProgressItem, UserProfile, ProfileSummary, base_points,
    LESSON_POINT_VALUE, QUIZ_POINT_VALUE, UNKNOWN_COURSE_TITLE,
};
pub use milestone::Milestone;

pub use error::{LedgerError, ErrorKind, Result};
pub use outcome::{RegistrationResult, OperationResult, ProgressResult};
