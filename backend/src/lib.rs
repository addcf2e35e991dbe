//! # Speechstats - speech statistics over CSV sources
//!
//! Reads speech records (`speaker, topic, date, words`) from one or more CSV
//! sources and answers three questions:
//!
//! - Who gave the most speeches in 2013?
//! - Who spoke most often about internal security?
//! - Who used the fewest words overall?
//!
//! A question without a unique answer is answered with `null`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use speechstats::{evaluate_sources, SourceFetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let urls = vec!["https://example.org/speeches.csv".to_string()];
//!     let report = evaluate_sources(&urls, &SourceFetcher::default()).await;
//!     println!("{:?}", report.evaluation);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Records, record set, evaluation result
//! - [`parser`] - CSV parsing with encoding detection
//! - [`ingest`] - Fetching sources by URL
//! - [`validation`] - `url<N>` query parameter checks
//! - [`evaluation`] - Aggregation and the request pipeline
//! - [`config`] - Server configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Input
pub mod ingest;
pub mod parser;
pub mod validation;

// Aggregation
pub mod evaluation;

// Runtime
pub mod config;
pub mod logging;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, FetchError, RowError, ServerError};

pub use models::{Criteria, Evaluation, RecordSet, SpeechRecord, TARGET_TOPIC, TARGET_YEAR};

pub use parser::{parse_bytes_auto, parse_str, ParseResult, SkippedRow};

pub use ingest::SourceFetcher;

pub use validation::{accepted_urls, ParamCheck, UrlParamValidator};

pub use evaluation::{evaluate, evaluate_params, evaluate_sources, Report};

pub use config::{LogFormat, ServerConfig};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
