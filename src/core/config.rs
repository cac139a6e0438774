//! Client configuration.
//!
//! Values come from the builder, from environment variables or from a
//! dotenv-style file. Unset variables keep their defaults.

use crate::core::domain::{
    error::{KvError, KvResult, ValidationError},
    value_object::validate_url,
};
use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;
use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090";

pub const ENV_BASE_URL: &str = "KV_STORE_URL";
pub const ENV_RATE_LIMIT_RPS: &str = "KV_RATE_LIMIT_RPS";
pub const ENV_RATE_LIMIT_BURST: &str = "KV_RATE_LIMIT_BURST";
pub const ENV_POLL_INTERVAL_SECS: &str = "KV_POLL_INTERVAL_SECS";

const ENV_NAMES: [&str; 4] = [
    ENV_BASE_URL,
    ENV_RATE_LIMIT_RPS,
    ENV_RATE_LIMIT_BURST,
    ENV_POLL_INTERVAL_SECS,
];

/// Client-side request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_second == 0 {
            return Err(ValidationError::Field {
                field: "requests_per_second".to_string(),
                message: "Rate limit must allow at least one request per second".to_string(),
            });
        }
        if self.burst_size == 0 {
            return Err(ValidationError::Field {
                field: "burst_size".to_string(),
                message: "Burst size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration of a [`crate::KvConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the store's HTTP interface.
    pub base_url: String,
    /// Optional client-side rate limit; `None` sends requests immediately.
    pub rate_limit: Option<RateLimitConfig>,
    /// Optional period of background status polling; `None` refreshes only
    /// at startup and after mutations.
    pub poll_interval: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit: None,
            poll_interval: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Only the `KV_*` variables are looked up; the rest of the environment is
    /// never read.
    pub fn from_env() -> KvResult<Self> {
        Self::from_vars(lookup_vars(|name| std::env::var(name))?)
    }

    /// Reads the configuration from a dotenv-style file without touching the
    /// process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> KvResult<Self> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            KvError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let mut vars = HashMap::new();
        for item in iter {
            let (name, value) = item.map_err(|e| {
                KvError::Configuration(format!("Invalid entry in {}: {}", path.display(), e))
            })?;
            vars.insert(name, value);
        }
        Self::from_vars(vars)
    }

    fn from_vars(vars: HashMap<String, String>) -> KvResult<Self> {
        let mut config = Self::default();

        if let Some(url) = vars.get(ENV_BASE_URL) {
            config.base_url = url.trim().to_string();
        }

        let rps = parse_var::<u32>(&vars, ENV_RATE_LIMIT_RPS)?;
        let burst = parse_var::<u32>(&vars, ENV_RATE_LIMIT_BURST)?;
        config.rate_limit = match (rps, burst) {
            (Some(requests_per_second), burst) => Some(RateLimitConfig {
                requests_per_second,
                burst_size: burst.unwrap_or(requests_per_second),
            }),
            (None, Some(_)) => {
                return Err(ValidationError::ConstraintViolation(format!(
                    "{} requires {}",
                    ENV_RATE_LIMIT_BURST, ENV_RATE_LIMIT_RPS
                ))
                .into());
            }
            (None, None) => None,
        };

        config.poll_interval = parse_var::<u64>(&vars, ENV_POLL_INTERVAL_SECS)?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        config.validate()?;
        Ok(config)
    }

    /// Checks the whole configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_url(&self.base_url)?;
        if let Some(rate_limit) = &self.rate_limit {
            rate_limit.validate()?;
        }
        if self.poll_interval == Some(Duration::ZERO) {
            return Err(ValidationError::Field {
                field: "poll_interval".to_string(),
                message: "Poll interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Collects the configuration variables through `lookup`.
fn lookup_vars<F>(lookup: F) -> Result<HashMap<String, String>, ValidationError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut vars = HashMap::new();
    for name in ENV_NAMES {
        match lookup(name) {
            Ok(value) => {
                vars.insert(name.to_string(), value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                return Err(ValidationError::Field {
                    field: name.to_string(),
                    message: "Value is not valid UTF-8".to_string(),
                });
            }
        }
    }
    Ok(vars)
}

fn parse_var<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, ValidationError> {
    match vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| ValidationError::Field {
            field: name.to_string(),
            message: format!("'{}' is not a valid number", raw),
        }),
    }
}
