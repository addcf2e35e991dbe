//! HTTP API module.
//!
//! The server itself and the per-request diagnostics it collects.

pub mod logs;
pub mod server;

pub use logs::{Diagnostics, LogEntry, LogLevel};
pub use server::{router, start_server, AppState};
