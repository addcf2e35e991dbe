//! Server configuration.
//!
//! Values come from the environment (a `.env` file is loaded first if
//! present) and can be overridden on the command line.
//!
//! | Variable                         | Default   |
//! |----------------------------------|-----------|
//! | `SPEECHSTATS_HOST`               | `0.0.0.0` |
//! | `SPEECHSTATS_PORT`               | `8081`    |
//! | `SPEECHSTATS_FETCH_TIMEOUT_SECS` | none      |
//! | `SPEECHSTATS_LOG_FORMAT`         | `pretty`  |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8081;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "compact" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "SPEECHSTATS_LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the HTTP server needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-source fetch timeout; `None` waits as long as the network does
    pub fetch_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("SPEECHSTATS_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("SPEECHSTATS_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SPEECHSTATS_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(secs) = lookup("SPEECHSTATS_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SPEECHSTATS_FETCH_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            config.fetch_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(format) = lookup("SPEECHSTATS_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SPEECHSTATS_HOST", "127.0.0.1"),
            ("SPEECHSTATS_PORT", "9000"),
            ("SPEECHSTATS_FETCH_TIMEOUT_SECS", "30"),
            ("SPEECHSTATS_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config =
            ServerConfig::from_lookup(lookup(&[("SPEECHSTATS_FETCH_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.fetch_timeout, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("SPEECHSTATS_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SPEECHSTATS_PORT"));
    }

    #[test]
    fn test_invalid_log_format() {
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
