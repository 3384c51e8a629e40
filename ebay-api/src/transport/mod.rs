//! Raw HTTP transport layer.
//!
//! A [`Transport`] performs exactly one HTTP round trip and hands back the
//! status and body untouched. It knows nothing about calls,
//! envelopes or acknowledgments; that is the dispatcher's job
//! ([`crate::client::EbayClient`]).
//!
//! The trait is sealed. [`HttpTransport`] (reqwest) is the production
//! implementation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ebay_api::transport::{HttpTransport, RequestContext, Transport};
//!
//! # async fn example() -> ebay_api::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let ctx = RequestContext {
//!     url: "https://api.sandbox.ebay.com/ws/api.dll",
//!     headers: vec![("X-EBAY-API-CALL-NAME", "GeteBayOfficialTime")],
//!     content_type: Some("text/xml"),
//! };
//!
//! let response = transport.post(ctx, b"<?xml version=\"1.0\"?>").await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::error::Result;

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// HTTP method for REST-style calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`, parameters in the querystring.
    #[default]
    Get,
    /// `POST`, parameters in the querystring and an empty body.
    Post,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Absolute URL, querystring included.
    pub url: &'a str,
    /// Extra headers.
    pub headers: Vec<(&'a str, &'a str)>,
    /// `Content-Type` header value, if any.
    pub content_type: Option<&'a str>,
}

/// Reply from a transport round trip.
///
/// The status is reported as-is; non-2xx replies are not errors at this
/// layer.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw reply body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Body as lossy UTF-8, for logging and error messages.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One-round-trip HTTP transport.
///
/// Network-level failures (connect, timeout, body read) surface as
/// [`crate::ApiError::Transport`]. No retries happen here.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes a GET request.
    fn get<'a>(
        &'a self,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a POST request with `body`.
    fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
