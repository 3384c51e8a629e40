//! Transport dispatcher.
//!
//! [`EbayClient`] sends any [`Call`] over one of two paths:
//!
//! - **XML** ([`EbayClient::execute`]): `POST {base_url}/ws/api.dll` with the
//!   developer/app/cert keys, call name, site ID and compatibility level in
//!   `X-EBAY-API-*` headers and an XML envelope body. A non-200 status is an
//!   [`ApiError::HttpStatus`]; a reply whose `Ack` is `Failure` is an
//!   [`ApiError::Api`].
//! - **REST** ([`EbayClient::execute_rest`]): parameters in the querystring
//!   of a caller-chosen endpoint, JSON reply. The reply is parsed whatever
//!   the HTTP status and returned even when it reports failure; callers
//!   inspect it through [`Response::failed`].
//!
//! Network failures propagate immediately. Nothing here retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ebay_api::{Credentials, EbayClient, calls::GetItemRequest};
//!
//! # async fn example() -> ebay_api::error::Result<()> {
//! let client = EbayClient::sandbox(Credentials::from_env()?)?;
//! let item = client.execute(&GetItemRequest::new("110012345678")).await?;
//! println!("{} is {:?}", item.item.title, item.item.selling_status.listing_status);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use crate::{
    call::{Call, Response, RestCall, XmlCall, render_envelope},
    config::{ClientConfig, Environment},
    credentials::Credentials,
    error::{ApiError, Result},
    transport::{HttpMethod, HttpTransport, RequestContext, Transport, TransportResponse},
};

/// Content type of XML requests.
pub const XML_CONTENT_TYPE: &str = "text/xml";

/// eBay API client.
///
/// Cheap to clone; clones share credentials, configuration and the
/// connection pool.
pub struct EbayClient<T: Transport = HttpTransport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    credentials: Credentials,
    config: ClientConfig,
    trading_url: String,
    transport: T,
}

impl<T: Transport> Clone for EbayClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Transport> std::fmt::Debug for EbayClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EbayClient")
            .field("credentials", &self.inner.credentials)
            .field("trading_url", &self.inner.trading_url)
            .field("transport", &self.inner.transport.protocol_name())
            .finish_non_exhaustive()
    }
}

impl EbayClient<HttpTransport> {
    /// Creates a client over the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for invalid configuration and
    /// [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Ok(Self::with_transport(credentials, config, transport))
    }

    /// Client for the sandbox environment with default settings.
    ///
    /// # Errors
    ///
    /// See [`EbayClient::new`].
    pub fn sandbox(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, ClientConfig::for_environment(Environment::Sandbox))
    }

    /// Client for the production environment with default settings.
    ///
    /// # Errors
    ///
    /// See [`EbayClient::new`].
    pub fn production(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, ClientConfig::for_environment(Environment::Production))
    }
}

impl<T: Transport> EbayClient<T> {
    /// Creates a client over an explicit transport.
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        let trading_url = config.trading_url();
        Self { inner: Arc::new(Inner { credentials, config, trading_url, transport }) }
    }

    /// Credentials used for every call.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Trading API endpoint.
    #[must_use]
    pub fn trading_url(&self) -> &str {
        &self.inner.trading_url
    }

    /// Sends an XML call and fails on a `Failure` acknowledgment.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`]: network failure
    /// - [`ApiError::HttpStatus`]: non-200 reply, body kept verbatim
    /// - [`ApiError::XmlEncode`] / [`ApiError::XmlDecode`]: codec failure
    /// - [`ApiError::Api`]: the reply's `Ack` is `Failure`. Only the error
    ///   records survive; call [`EbayClient::execute_unchecked`] to keep the
    ///   rest of the reply.
    pub async fn execute<C: XmlCall>(&self, call: &C) -> Result<C::Response> {
        let response = self.execute_unchecked(call).await?;

        if response.failed() {
            return Err(ApiError::Api { call: call.name(), errors: response.errors() });
        }

        Ok(response)
    }

    /// Sends an XML call and returns the typed reply even when its `Ack` is
    /// `Failure`.
    ///
    /// Use this when a failed reply still carries data the caller needs;
    /// check [`Response::failed`] and [`Response::errors`] yourself.
    ///
    /// # Errors
    ///
    /// As [`EbayClient::execute`], minus [`ApiError::Api`].
    #[instrument(skip_all, fields(call = call.name()))]
    pub async fn execute_unchecked<C: XmlCall>(&self, call: &C) -> Result<C::Response> {
        let body = render_envelope(call, &self.inner.credentials)?;
        debug!(body = %body, "sending XML request");

        let reply = self.post_xml(call.name(), body.as_bytes()).await?;

        if reply.status != 200 {
            return Err(ApiError::HttpStatus { status: reply.status, body: reply.body_text() });
        }

        debug!(status = reply.status, body = %reply.body_text(), "received XML response");

        call.parse(&reply.body)
    }

    async fn post_xml(&self, call_name: &str, body: &[u8]) -> Result<TransportResponse> {
        let credentials = &self.inner.credentials;
        let site_id = self.inner.config.site_id.to_string();
        let compatibility_level = self.inner.config.compatibility_level.to_string();

        let ctx = RequestContext {
            url: &self.inner.trading_url,
            headers: vec![
                ("X-EBAY-API-DEV-NAME", credentials.dev_id()),
                ("X-EBAY-API-APP-NAME", credentials.app_id()),
                ("X-EBAY-API-CERT-NAME", credentials.cert_id()),
                ("X-EBAY-API-CALL-NAME", call_name),
                ("X-EBAY-API-SITEID", site_id.as_str()),
                ("X-EBAY-API-COMPATIBILITY-LEVEL", compatibility_level.as_str()),
            ],
            content_type: Some(XML_CONTENT_TYPE),
        };

        self.inner.transport.post(ctx, body).await
    }

    /// Sends a REST call with its parameters in the querystring of
    /// `endpoint`.
    ///
    /// The JSON reply is parsed regardless of HTTP status and returned even
    /// when its `Ack` is `Failure`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`]: `endpoint` is not a valid URL
    /// - [`ApiError::Transport`]: network failure
    /// - [`ApiError::JsonDecode`]: the body is not the expected JSON
    #[instrument(skip_all, fields(call = call.name(), method = method.as_str()))]
    pub async fn execute_rest<C: RestCall>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        call: &C,
    ) -> Result<C::Response> {
        let url = rest_url(endpoint, &call.render(&self.inner.credentials))?;
        debug!(url = %url, "sending REST request");

        let ctx = RequestContext { url: url.as_str(), headers: vec![], content_type: None };
        let reply = match method {
            HttpMethod::Get => self.inner.transport.get(ctx).await?,
            HttpMethod::Post => self.inner.transport.post(ctx, &[]).await?,
        };

        debug!(status = reply.status, body = %reply.body_text(), "received REST response");

        call.parse(&reply.body)
    }
}

/// Appends `params` to `endpoint`, replacing any existing query.
fn rest_url(endpoint: &str, params: &[(&'static str, String)]) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ApiError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

    url.set_query(None);
    url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));

    Ok(url)
}
