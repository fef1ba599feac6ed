//! Storage abstraction and implementations for LearnPath.
//!
//! This crate provides a trait-based storage interface with an in-memory
//! reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;

pub use trait_::{LedgerStore, StorageError, Result, ProgressDelta};
pub use memory::MemoryStore;
