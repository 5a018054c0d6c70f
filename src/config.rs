//! Configuration management for plugin-registry
//!
//! Settings come from environment variables with defaults, and the CLI may
//! override the file locations afterwards.
//!
//! # Environment Variables
//!
//! - `PLUGIN_REGISTRY_GITHUB_TOKEN` (falls back to `GITHUB_TOKEN`): API credential, optional
//! - `PLUGIN_REGISTRY_FILE`: registry JSON path - default: "badges.json"
//! - `PLUGIN_REGISTRY_DOCUMENT`: listing document path - default: "README.md"
//! - `PLUGIN_REGISTRY_API_URL`: release API base - default: "https://api.github.com"
//! - `PLUGIN_REGISTRY_WEB_URL`: repository host base - default: "https://github.com"
//! - `PLUGIN_REGISTRY_BADGE_SOURCE`: published registry copy queried by the release badge
//! - `PLUGIN_REGISTRY_REQUEST_TIMEOUT`: timeout in seconds - default: "30"
//! - `PLUGIN_REGISTRY_LOG_LEVEL`: logging level - default: "info"
//! - `PLUGIN_REGISTRY_LOG_JSON`: JSON log output (true|false) - default: "false"

use crate::util::logging::try_parse_level;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_REGISTRY_FILE: &str = "badges.json";
const DEFAULT_DOCUMENT_FILE: &str = "README.md";
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_WEB_URL: &str = "https://github.com";
const DEFAULT_BADGE_SOURCE: &str =
    "https://rusherdevelopment.github.io/rusherhack-plugins/badges.json";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// A URL setting could not be parsed
    #[error("Invalid URL in {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

/// Runtime configuration for the registry commands
#[derive(Clone)]
pub struct RegistryConfig {
    /// Registry JSON file
    pub registry_path: PathBuf,

    /// Listing document containing the insertion marker
    pub document_path: PathBuf,

    /// Base URL of the release API
    pub api_url: String,

    /// Base URL repositories are hosted under
    pub web_url: String,

    /// Published copy of the registry that release badges query
    pub badge_source: String,

    /// Credential sent with release API requests
    pub github_token: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for RegistryConfig {
    /// Loads configuration from `PLUGIN_REGISTRY_*` variables, falling back to defaults.
    fn default() -> Self {
        let github_token = non_empty_var("PLUGIN_REGISTRY_GITHUB_TOKEN")
            .or_else(|| non_empty_var("GITHUB_TOKEN"));

        let request_timeout_secs = env::var("PLUGIN_REGISTRY_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_json = env::var("PLUGIN_REGISTRY_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            registry_path: non_empty_var("PLUGIN_REGISTRY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_FILE)),
            document_path: non_empty_var("PLUGIN_REGISTRY_DOCUMENT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_FILE)),
            api_url: non_empty_var("PLUGIN_REGISTRY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            web_url: non_empty_var("PLUGIN_REGISTRY_WEB_URL")
                .unwrap_or_else(|| DEFAULT_WEB_URL.to_string()),
            badge_source: non_empty_var("PLUGIN_REGISTRY_BADGE_SOURCE")
                .unwrap_or_else(|| DEFAULT_BADGE_SOURCE.to_string()),
            github_token,
            request_timeout_secs,
            log_level: env::var("PLUGIN_REGISTRY_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
            log_json,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl RegistryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero or oversized timeout, an unknown log
    /// level, or a base URL that does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if try_parse_level(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        for (field, value) in [
            ("PLUGIN_REGISTRY_API_URL", &self.api_url),
            ("PLUGIN_REGISTRY_WEB_URL", &self.web_url),
            ("PLUGIN_REGISTRY_BADGE_SOURCE", &self.badge_source),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn has_token(&self) -> bool {
        self.github_token.is_some()
    }
}

// Hand-written so the credential never reaches logs.
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("registry_path", &self.registry_path)
            .field("document_path", &self.document_path)
            .field("api_url", &self.api_url)
            .field("web_url", &self.web_url)
            .field("badge_source", &self.badge_source)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl fmt::Display for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plugin Registry Configuration:")?;
        writeln!(f, "  Registry: {}", self.registry_path.display())?;
        writeln!(f, "  Document: {}", self.document_path.display())?;
        writeln!(f, "  API URL: {}", self.api_url)?;
        writeln!(f, "  Web URL: {}", self.web_url)?;
        writeln!(f, "  Badge Source: {}", self.badge_source)?;
        writeln!(
            f,
            "  Token: {}",
            if self.has_token() { "configured" } else { "not set" }
        )?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
