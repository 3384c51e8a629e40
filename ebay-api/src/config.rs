//! Client configuration.
//!
//! TOML-deserializable settings for endpoints, request headers, the HTTP
//! transport and the paginated aggregator. Every field has a default, so an
//! empty document is a valid sandbox configuration.

use std::{path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{ApiError, Result},
    reliability::RetryPolicy,
    transport::HttpConfig,
};

/// Default `X-EBAY-API-COMPATIBILITY-LEVEL`.
pub const DEFAULT_COMPATIBILITY_LEVEL: u32 = 1113;

/// Default Client Alerts REST endpoint.
pub const DEFAULT_CLIENT_ALERTS_URL: &str = "http://clientalerts.ebay.com/ws/ecasvc/ClientAlerts";

/// eBay API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Developer sandbox.
    #[default]
    Sandbox,
    /// Live marketplace.
    Production,
}

impl Environment {
    /// Base URL of the Trading API for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.ebay.com",
            Self::Production => "https://api.ebay.com",
        }
    }
}

/// Root client configuration.
///
/// ```toml
/// environment = "production"
/// site_id = 3
///
/// [http]
/// timeout_secs = 30
///
/// [pagination]
/// stagger_ms = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Target environment.
    pub environment: Environment,

    /// Overrides the environment's base URL (proxies, test servers).
    pub base_url: Option<String>,

    /// Marketplace site ID (`X-EBAY-API-SITEID`).
    pub site_id: i32,

    /// Schema version (`X-EBAY-API-COMPATIBILITY-LEVEL`).
    pub compatibility_level: u32,

    /// Client Alerts REST endpoint.
    pub client_alerts_url: String,

    /// HTTP transport settings.
    pub http: HttpConfig,

    /// Paginated fetch settings.
    pub pagination: PaginationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            site_id: 0,
            compatibility_level: DEFAULT_COMPATIBILITY_LEVEL,
            client_alerts_url: DEFAULT_CLIENT_ALERTS_URL.to_owned(),
            http: HttpConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration for `environment`.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self { environment, ..Self::default() }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] on syntax errors, unknown enum values or
    /// failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebay_api::config::{ClientConfig, Environment};
    ///
    /// let config = ClientConfig::from_toml("environment = \"production\"").unwrap();
    /// assert_eq!(config.environment, Environment::Production);
    /// assert_eq!(config.base_url(), "https://api.ebay.com");
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ApiError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    /// Validates URLs and transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        validate_url("base_url", self.base_url())?;
        validate_url("client_alerts_url", &self.client_alerts_url)?;
        self.http.validate()
    }

    /// Effective Trading API base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Trading API endpoint (`{base_url}/ws/api.dll`).
    #[must_use]
    pub fn trading_url(&self) -> String {
        format!("{}/ws/api.dll", self.base_url())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| ApiError::Config(format!("invalid {field} '{value}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!(
            "{field} must use http or https, got: {}",
            url.scheme()
        )));
    }

    Ok(())
}

/// Paginated aggregator tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Wait between launching successive page fetches, in milliseconds.
    pub stagger_ms: u64,
    /// Wait before retrying a failed page, in milliseconds.
    pub retry_backoff_ms: u64,
    /// Retries per failed page.
    pub retries: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { stagger_ms: 200, retry_backoff_ms: 500, retries: 1 }
    }
}

impl PaginationConfig {
    /// Stagger interval.
    #[must_use]
    pub const fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    /// Retry policy for a single page.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.retries, Duration::from_millis(self.retry_backoff_ms))
    }
}
