//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 transport using reqwest. Replies are returned whatever
//! their status; deciding what a 500 means is left to the caller.

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{ApiError, Result},
    transport::{HttpMethod, RequestContext, Transport, TransportResponse, sealed},
};

/// Checks that the URL parses and uses an HTTP scheme.
fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::Config(format!("invalid URL {raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(ApiError::Config(format!("URL missing host: {raw}")));
    }

    Ok(url)
}

/// Rejects header names and values carrying control characters.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains(['\r', '\n', '\0']) {
        return Err(ApiError::InvalidInput(format!(
            "invalid header name {name:?}: control characters not allowed"
        )));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(ApiError::InvalidInput(format!(
            "invalid value for header {name}: control characters not allowed"
        )));
    }
    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports connection pooling, keep-alive and HTTP/2 multiplexing. Clone the
/// owning client rather than building several transports; the underlying
/// `reqwest::Client` is shared.
///
/// # Examples
///
/// ```
/// use ebay_api::transport::{HttpConfig, HttpTransport, HttpVersion, Transport};
///
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport with [`HttpConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the TLS backend cannot initialize.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for out-of-range timeouts and
    /// [`ApiError::Transport`] if client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build()?;

        Ok(Self { client, http_version: config.http_version })
    }

    #[instrument(skip(self, ctx, body), fields(method = method.as_str(), url = ctx.url))]
    async fn execute_request(
        &self,
        ctx: RequestContext<'_>,
        method: HttpMethod,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse> {
        let url = validate_url(ctx.url)?;

        for (key, value) in &ctx.headers {
            validate_header(key, value)?;
        }

        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        if let Some(content_type) = ctx.content_type {
            request = request.header("Content-Type", content_type);
        }

        for (key, value) in ctx.headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "received response");

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(&'a self, ctx: RequestContext<'a>) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Get, None).await
    }

    async fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(ctx, HttpMethod::Post, Some(body)).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}
