use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT, DEFAULT_TIMEOUT_SECS};
use crate::notify::DEFAULT_DISMISS_AFTER;
use crate::resolve::MAX_SUGGEST_DISTANCE;
use crate::session::SessionOptions;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dexcrate.toml";

/// Environment variable overriding `[api].base_url`.
pub const API_URL_ENV: &str = "DEXCRATE_API_URL";

/// Upper bound for `[suggest].max_distance`. Past this, suggestions stop
/// being near-misses and start being guesses.
const MAX_ALLOWED_DISTANCE: usize = 10;

/// Main configuration structure loaded from dexcrate.toml
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub api: Option<ApiConfig>,
    pub suggest: Option<SuggestConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub list_limit: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SuggestConfig {
    pub max_distance: Option<usize>,
    pub dismiss_after_secs: Option<u64>,
}

impl Config {
    /// Load config from file, or return default if no config exists.
    /// If an explicit path is provided via --config, it MUST exist (error if not).
    /// If no path is provided, check ./dexcrate.toml (use default if not found).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!("Config file not found: {}", p.display());
                }
                p
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    default_path
                } else {
                    return Ok(Config::default());
                }
            }
        };

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse and validate a config body.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(url) = self.api.as_ref().and_then(|a| a.base_url.as_deref()) {
            validate_base_url(url, "api.base_url")?;
        }
        if let Some(limit) = self.api.as_ref().and_then(|a| a.list_limit) {
            if limit == 0 {
                bail!("Invalid api.list_limit: must be greater than 0");
            }
        }
        if let Some(d) = self.suggest.as_ref().and_then(|s| s.max_distance) {
            if d > MAX_ALLOWED_DISTANCE {
                bail!(
                    "Invalid suggest.max_distance {}: must be at most {}",
                    d,
                    MAX_ALLOWED_DISTANCE
                );
            }
        }
        Ok(())
    }

    /// Get API base URL with resolution order: CLI > env > config > default
    pub fn base_url(&self, cli_url: Option<&str>) -> Result<String> {
        if let Some(url) = cli_url {
            validate_base_url(url, "--api-url")?;
            return Ok(url.to_string());
        }

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                validate_base_url(&url, API_URL_ENV)?;
                return Ok(url);
            }
        }

        Ok(self
            .api
            .as_ref()
            .and_then(|a| a.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
    }

    pub fn list_limit(&self) -> usize {
        self.api
            .as_ref()
            .and_then(|a| a.list_limit)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// Request timeout; a CLI override wins over the config file.
    pub fn timeout(&self, cli_timeout: Option<Duration>) -> Duration {
        cli_timeout.unwrap_or_else(|| {
            Duration::from_secs(
                self.api
                    .as_ref()
                    .and_then(|a| a.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            )
        })
    }

    pub fn max_distance(&self) -> usize {
        self.suggest
            .as_ref()
            .and_then(|s| s.max_distance)
            .unwrap_or(MAX_SUGGEST_DISTANCE)
    }

    pub fn dismiss_after(&self) -> Duration {
        self.suggest
            .as_ref()
            .and_then(|s| s.dismiss_after_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_DISMISS_AFTER)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_distance: self.max_distance(),
            dismiss_after: self.dismiss_after(),
        }
    }
}

/// Validate that a base URL is absolute http(s)
fn validate_base_url(raw: &str, field: &str) -> Result<()> {
    let parsed =
        url::Url::parse(raw).with_context(|| format!("Invalid {} '{}'", field, raw))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => bail!(
            "Invalid {} '{}': scheme must be http or https, got '{}'",
            field,
            raw,
            other
        ),
    }
}
