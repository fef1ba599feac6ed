//! LearnPath tool server.
//!
//! Exposes the progress ledger as MCP-style tools over newline-delimited
//! JSON-RPC, on stdio or a Unix socket.

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::{LedgerServer, Session};
