//! Runtime configuration.
//!
//! Defaults live in constants; each can be overridden by an environment
//! variable at startup.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const STATIC_DIR: &str = "static";

pub const ENV_BIND_ADDR: &str = "POSTING_BIND_ADDR";
pub const ENV_UPSTREAM: &str = "POSTING_UPSTREAM_URL";
pub const ENV_TIMEOUT: &str = "POSTING_TIMEOUT_SECS";
pub const ENV_LABEL_MODE: &str = "POSTING_LABEL_MODE";
pub const ENV_LOG_LEVEL: &str = "POSTING_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },
    #[error("{var}: invalid url {value:?}: {source}")]
    Upstream {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{var}: upstream must be http or https, got {scheme:?}")]
    Scheme { var: &'static str, scheme: String },
    #[error("{var}: expected a positive number of seconds, got {value:?}")]
    Timeout { var: &'static str, value: String },
    #[error("{var}: expected \"descriptive\" or \"resolve\", got {value:?}")]
    LabelMode { var: &'static str, value: String },
}

/// Which author endpoint fills the selector, and how its labels are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// `GET /author`; labels come from name fields on each entry.
    #[default]
    Descriptive,
    /// `GET /author/available/`; labels start as bare ids and are replaced
    /// by profile lookups.
    ResolveProfiles,
}

impl LabelMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "descriptive" => Some(LabelMode::Descriptive),
            "resolve" | "resolve_profiles" => Some(LabelMode::ResolveProfiles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub upstream: Url,
    pub timeout_secs: u64,
    pub label_mode: LabelMode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            upstream: Url::parse(DEFAULT_UPSTREAM).unwrap(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            label_mode: LabelMode::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = value.parse().map_err(|_| ConfigError::BindAddr {
                var: ENV_BIND_ADDR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_UPSTREAM) {
            config.upstream = parse_upstream(&value)?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT) {
            config.timeout_secs = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Timeout {
                        var: ENV_TIMEOUT,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_LABEL_MODE) {
            config.label_mode = LabelMode::parse(&value).ok_or(ConfigError::LabelMode {
                var: ENV_LABEL_MODE,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            if !value.trim().is_empty() {
                config.log_level = value.trim().to_string();
            }
        }

        Ok(config)
    }
}

fn parse_upstream(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::Upstream {
        var: ENV_UPSTREAM,
        value: value.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Scheme {
            var: ENV_UPSTREAM,
            scheme: url.scheme().to_string(),
        });
    }

    Ok(url)
}
