//! Loading CSV sources by URL.
//!
//! `http` and `https` URLs are fetched with reqwest, `file` URLs are read
//! from the local filesystem. Anything else is rejected.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use speechstats::ingest::SourceFetcher;
//!
//! let fetcher = SourceFetcher::new(reqwest::Client::new());
//! let parsed = fetcher.load("https://example.org/speeches.csv").await?;
//! println!("{} records", parsed.records.len());
//! ```

use std::time::Duration;

use url::Url;

use crate::error::{ConfigError, FetchError, FetchResult};
use crate::parser::{parse_bytes_auto, ParseResult};

/// Fetches and parses CSV sources.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl SourceFetcher {
    /// Create a fetcher around an existing client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Create a fetcher whose requests give up after `timeout`
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("speechstats/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }

    /// Read the raw bytes behind `source`.
    pub async fn fetch_bytes(&self, source: &str) -> FetchResult<Vec<u8>> {
        let url = Url::parse(source).map_err(|e| FetchError::MalformedUrl {
            url: source.to_string(),
            source: e,
        })?;

        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FetchError::InvalidFilePath(source.to_string()))?;
                Ok(tokio::fs::read(path).await?)
            }
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }

    async fn fetch_http(&self, url: Url) -> FetchResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch `source` and parse it into records.
    pub async fn load(&self, source: &str) -> FetchResult<ParseResult> {
        let bytes = self.fetch_bytes(source).await?;
        Ok(parse_bytes_auto(&bytes))
    }
}
