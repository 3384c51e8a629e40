//! Authentication values shared by every call.

use std::fmt;

use crate::error::{ApiError, Result};

/// Environment variable holding the developer key.
pub const DEV_ID_VAR: &str = "EBAY_DEV_ID";
/// Environment variable holding the application key.
pub const APP_ID_VAR: &str = "EBAY_APP_ID";
/// Environment variable holding the certificate key.
pub const CERT_ID_VAR: &str = "EBAY_CERT_ID";
/// Environment variable holding the user auth token.
pub const AUTH_TOKEN_VAR: &str = "EBAY_AUTH_TOKEN";

/// The four authentication values required by every call.
///
/// Immutable once built. A client wraps its credentials in an `Arc` and
/// lends `&Credentials` to each call's `render`, which never mutates them.
///
/// `Debug` output redacts the certificate key and auth token.
///
/// # Examples
///
/// ```
/// use ebay_api::Credentials;
///
/// let creds = Credentials::new("dev", "app", "cert-s3cret", "token-s3cret");
/// assert_eq!(creds.app_id(), "app");
/// assert!(!format!("{creds:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    dev_id: String,
    app_id: String,
    cert_id: String,
    auth_token: String,
}

impl Credentials {
    /// Builds credentials from the four key values.
    pub fn new(
        dev_id: impl Into<String>,
        app_id: impl Into<String>,
        cert_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            dev_id: dev_id.into(),
            app_id: app_id.into(),
            cert_id: cert_id.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Reads credentials from `EBAY_DEV_ID`, `EBAY_APP_ID`, `EBAY_CERT_ID`
    /// and `EBAY_AUTH_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ApiError::Config(format!("environment variable {name} is not set")))
        };
        Ok(Self::new(
            read(DEV_ID_VAR)?,
            read(APP_ID_VAR)?,
            read(CERT_ID_VAR)?,
            read(AUTH_TOKEN_VAR)?,
        ))
    }

    /// Developer key (`X-EBAY-API-DEV-NAME`).
    #[must_use]
    pub fn dev_id(&self) -> &str {
        &self.dev_id
    }

    /// Application key (`X-EBAY-API-APP-NAME`, REST `appid`).
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Certificate key (`X-EBAY-API-CERT-NAME`).
    #[must_use]
    pub fn cert_id(&self) -> &str {
        &self.cert_id
    }

    /// User auth token embedded as `RequesterCredentials`.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("dev_id", &self.dev_id)
            .field("app_id", &self.app_id)
            .field("cert_id", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}
