//! Structured results returned by mutating operations.
//!
//! Mutations never propagate errors to the caller. They report a `success`
//! flag, a human-readable message, and on failure the [`ErrorKind`].

use serde::{Deserialize, Serialize};
use crate::error::{ErrorKind, LedgerError};
use crate::id::Identifier;

/// Result of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    pub success: bool,
    pub message: String,
    /// The identifier that was registered
    pub identifier: Identifier,
}

/// Result of an operation that carries no payload (enrollment, milestone replacement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl OperationResult {
    /// A successful result.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    /// A failed result built from an error.
    pub fn failed(err: &LedgerError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            error: Some(err.kind()),
        }
    }
}

impl From<crate::Result<String>> for OperationResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(err) => Self::failed(&err),
        }
    }
}

/// Result of a progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResult {
    pub success: bool,
    pub message: String,

    /// Points earned by this report, bonus included; 0 on failure
    pub new_points: u64,

    /// Running total after the report, or the unchanged total on failure
    pub total_points: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl ProgressResult {
    /// A failed report. `current_total` is the learner's unmodified total.
    pub fn failed(err: &LedgerError, current_total: u64) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            new_points: 0,
            total_points: current_total,
            error: Some(err.kind()),
        }
    }
}
