//! Front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FOOD3D_API_URL` - Base URL of the Food3D server (default: <http://localhost:5000>)
//! - `FOOD3D_STORAGE_PATH` - Slot file for persisted state (default: .food3d/storage.json)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default slot file path.
pub const DEFAULT_STORAGE_PATH: &str = ".food3d/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL the menu is fetched from
    pub api_url: Url,
    /// Path of the persistent slot file
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `FOOD3D_API_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `FOOD3D_API_URL` is not an absolute URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_url = parse_api_url(&get("FOOD3D_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("FOOD3D_API_URL".to_string(), e))?;
        let storage_path = PathBuf::from(get("FOOD3D_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            api_url,
            storage_path,
        })
    }
}

/// Parse an API base URL, requiring an http(s) scheme.
///
/// # Errors
///
/// Returns a description of the problem if `value` is not an absolute
/// http or https URL.
pub fn parse_api_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
