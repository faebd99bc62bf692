//! Configuration management for flighttracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "flighttracker";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTTRACKER_";

/// Default aviationstack API root.
pub const AVIATIONSTACK_BASE_URL: &str = "https://api.aviationstack.com/v1";

/// Default `OpenSky` Network API root.
pub const OPENSKY_BASE_URL: &str = "https://opensky-network.org/api";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTTRACKER_`, nested with `__`)
/// 2. TOML config file at `~/.config/flighttracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lookup behaviour.
    pub lookup: LookupConfig,
    /// aviationstack source settings.
    pub aviationstack: AviationstackConfig,
    /// `OpenSky` source settings.
    pub opensky: OpenSkyConfig,
    /// HTTP client settings shared by both sources.
    pub http: HttpConfig,
}

/// Which flight-data source answers lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Keyed per-flight lookup against aviationstack.
    Aviationstack,
    /// Unkeyed scan of all `OpenSky` state vectors.
    #[default]
    OpenSky,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aviationstack => write!(f, "aviationstack"),
            Self::OpenSky => write!(f, "opensky"),
        }
    }
}

/// Lookup-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// The data source to query.
    pub source: SourceKind,
    /// Abort an in-flight lookup when a newer one is submitted.
    pub cancel_superseded: bool,
}

/// aviationstack configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AviationstackConfig {
    /// API root; `/flights` is appended.
    pub base_url: String,
    /// Access key. Never serialized, so `config show` cannot leak it.
    #[serde(skip_serializing)]
    pub access_key: Option<String>,
}

/// `OpenSky` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenSkyConfig {
    /// API root; `/states/all` is appended.
    pub base_url: String,
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset leaves the client default in place.
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            cancel_superseded: true,
        }
    }
}

impl Default for AviationstackConfig {
    fn default() -> Self {
        Self {
            base_url: AVIATIONSTACK_BASE_URL.to_string(),
            access_key: None,
        }
    }
}

impl Default for OpenSkyConfig {
    fn default() -> Self {
        Self {
            base_url: OPENSKY_BASE_URL.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("flighttracker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Get the request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FLIGHTTRACKER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// A missing aviationstack key is not an error here; it only matters once
    /// that source is built.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        validate_base_url("aviationstack.base_url", &self.aviationstack.base_url)?;
        validate_base_url("opensky.base_url", &self.opensky.base_url)?;

        if self.http.timeout_secs == Some(0) {
            return Err(Error::ConfigValidation {
                message: "http.timeout_secs must be greater than 0".to_string(),
            });
        }

        if self
            .aviationstack
            .access_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err(Error::ConfigValidation {
                message: "aviationstack.access_key is set but blank".to_string(),
            });
        }

        Ok(())
    }

    /// Whether an aviationstack access key is available.
    #[must_use]
    pub fn has_access_key(&self) -> bool {
        self.aviationstack.access_key.is_some()
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        message: format!("{field} is not a valid URL ({e}): {value}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            message: format!("{field} must use http or https: {value}"),
        });
    }

    Ok(())
}
