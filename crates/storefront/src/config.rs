//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MAISON_DATA_DIR` - Directory for cart/wishlist snapshots (default: .maison)
//! - `MAISON_SEARCH_DELAY_MS` - Simulated search latency in ms (default: 300)
//! - `MAISON_CATALOG_URL` - Catalog endpoint returning `Product[]` JSON
//!   (default: built-in catalog)
//! - `MAISON_WRITE_BEHIND` - Write snapshots on a background thread (default: true)
//! - `MAISON_LOG_JSON` - Emit logs as JSON lines (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::stores::search::DEFAULT_SEARCH_DELAY;

const DEFAULT_DATA_DIR: &str = ".maison";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding persisted snapshots
    pub data_dir: PathBuf,
    /// Simulated latency before a search resolves
    pub search_delay: Duration,
    /// Remote catalog endpoint; the built-in catalog is used when unset
    pub catalog_url: Option<Url>,
    /// Persist snapshots on a background writer instead of inline
    pub write_behind: bool,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Configuration with defaults, storing snapshots in `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            search_delay: DEFAULT_SEARCH_DELAY,
            catalog_url: None,
            write_behind: true,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("MAISON_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let search_delay = match lookup("MAISON_SEARCH_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("MAISON_SEARCH_DELAY_MS".to_string(), e.to_string())
            })?),
            None => DEFAULT_SEARCH_DELAY,
        };

        let catalog_url = lookup("MAISON_CATALOG_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|raw| parse_catalog_url(&raw))
            .transpose()?;

        let write_behind = match lookup("MAISON_WRITE_BEHIND") {
            Some(raw) => parse_bool("MAISON_WRITE_BEHIND", &raw)?,
            None => true,
        };

        let log_json = match lookup("MAISON_LOG_JSON") {
            Some(raw) => parse_bool("MAISON_LOG_JSON", &raw)?,
            None => false,
        };

        Ok(Self {
            data_dir,
            search_delay,
            catalog_url,
            write_behind,
            log_json,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a catalog URL, accepting only http(s).
fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        ConfigError::InvalidEnvVar("MAISON_CATALOG_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "MAISON_CATALOG_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a boolean flag (true/false, 1/0, yes/no, on/off).
fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
