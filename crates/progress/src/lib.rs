//! Progress Ledger
//!
//! Course catalog, milestone bonuses, and the service that owns all
//! per-user progress and points.

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod milestone;
pub mod service;
pub mod shared;

pub use catalog::CourseCatalog;
pub use config::{LedgerConfig, CourseMilestones, ConfigError};
pub use milestone::MilestoneTable;
pub use service::ProgressService;
pub use shared::SharedLedger;
