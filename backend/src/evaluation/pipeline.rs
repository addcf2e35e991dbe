//! Request-level pipeline: parameters → sources → records → evaluation.
//!
//! Nothing in here fails. Bad parameters, unreachable sources and broken rows
//! are recorded as diagnostics and the evaluation runs on whatever records
//! could be collected.
//!
//! # Example
//!
//! ```rust,ignore
//! use speechstats::evaluation::evaluate_params;
//! use speechstats::ingest::SourceFetcher;
//!
//! let params = vec![("url1".to_string(), "https://example.org/a.csv".to_string())];
//! let report = evaluate_params(&params, &SourceFetcher::default()).await;
//! println!("{:?}", report.evaluation);
//! ```

use serde::Serialize;

use super::evaluate;
use crate::api::logs::Diagnostics;
use crate::error::FetchError;
use crate::ingest::SourceFetcher;
use crate::models::{Criteria, Evaluation, RecordSet};
use crate::validation::accepted_urls;

/// Outcome of one evaluation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub evaluation: Evaluation,

    /// Sources that passed parameter validation
    pub sources_accepted: usize,

    /// Sources that could not be loaded
    pub sources_failed: usize,

    /// Valid rows read over all sources, duplicates included
    pub records_read: usize,

    /// Distinct records that were evaluated
    pub unique_records: usize,

    pub diagnostics: Diagnostics,
}

/// Evaluate the sources named by ordered `url<N>` query parameters.
pub async fn evaluate_params(params: &[(String, String)], fetcher: &SourceFetcher) -> Report {
    let mut diagnostics = Diagnostics::new();
    let urls = accepted_urls(params, &mut diagnostics);
    evaluate_urls(&urls, fetcher, diagnostics).await
}

/// Evaluate a plain list of source URLs, in order.
pub async fn evaluate_sources(urls: &[String], fetcher: &SourceFetcher) -> Report {
    evaluate_urls(urls, fetcher, Diagnostics::new()).await
}

async fn evaluate_urls(
    urls: &[String],
    fetcher: &SourceFetcher,
    mut diagnostics: Diagnostics,
) -> Report {
    let mut records = RecordSet::new();
    let mut records_read = 0;
    let mut sources_failed = 0;

    // One source at a time, in parameter order.
    for url in urls {
        match fetcher.load(url).await {
            Ok(parsed) => {
                for skipped in &parsed.skipped {
                    diagnostics.warning(format!(
                        "{}. Row {} ({}) of '{}' not added.",
                        skipped.reason, skipped.line, skipped.content, url
                    ));
                }
                diagnostics.info(format!(
                    "Read {} rows from '{}' ({})",
                    parsed.records.len(),
                    url,
                    parsed.encoding
                ));
                records_read += parsed.records.len();
                records.extend(parsed.records);
            }
            Err(e) => {
                sources_failed += 1;
                diagnostics.error(describe_failure(url, &e));
            }
        }
    }

    let evaluation = evaluate(&records, &Criteria::default());

    Report {
        evaluation,
        sources_accepted: urls.len(),
        sources_failed,
        records_read,
        unique_records: records.len(),
        diagnostics,
    }
}

fn describe_failure(url: &str, err: &FetchError) -> String {
    match err {
        FetchError::MalformedUrl { .. } => format!("URL '{}' is malformed", url),
        _ => format!("Error reading file from URL '{}': {}", url, err),
    }
}
