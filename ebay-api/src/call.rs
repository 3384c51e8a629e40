//! Request and response contracts.
//!
//! Every API operation is a value implementing [`Call`]: it knows its
//! operation name, how to parse its own reply, and (through [`XmlCall`] or
//! [`RestCall`]) how to render itself into a transport payload. Replies
//! implement [`Response`], which reports the acknowledgment and the
//! structured error sequence the same way for XML and JSON.
//!
//! The dispatcher ([`crate::client::EbayClient`]) only ever sees these
//! traits, so adding an operation never touches transport code.
//!
//! Rendering is pure: `render` takes the credentials by shared reference and
//! returns a fresh value. Calling it twice with the same credentials yields
//! identical payloads.

use serde::{Serialize, de::DeserializeOwned};

use crate::{classify::ApiErrors, credentials::Credentials, error::Result};

/// Namespace of every Trading API request envelope.
pub const XML_NAMESPACE: &str = "urn:ebay:apis:eBLBaseComponents";

/// Declaration prefixed to every XML request.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// `Ack` value signalling failure.
pub const ACK_FAILURE: &str = "Failure";

/// A parsed API reply.
pub trait Response: Send + 'static {
    /// Raw acknowledgment (`Success`, `Warning`, `Failure`, ...).
    fn ack(&self) -> &str;

    /// Structured errors in API order. Empty when none were reported.
    fn errors(&self) -> ApiErrors;

    /// `true` iff the acknowledgment is exactly [`ACK_FAILURE`].
    ///
    /// Warnings and partial failures are not failures.
    fn failed(&self) -> bool {
        self.ack() == ACK_FAILURE
    }
}

/// One API operation.
pub trait Call: Send + Sync {
    /// Reply type produced by [`Call::parse`].
    type Response: Response;

    /// Operation name, used for the call-name header, the XML root element
    /// and the REST `callname` parameter.
    fn name(&self) -> &'static str;

    /// Parses a raw reply body.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body does not match the reply schema.
    fn parse(&self, body: &[u8]) -> Result<Self::Response>;
}

/// A call sent as an XML document over the header-authenticated POST path.
pub trait XmlCall: Call {
    /// Serializable request body. The dispatcher names its root element
    /// after [`Call::name`].
    type Body: Serialize;

    /// Produces the request body with the namespace and requester
    /// credentials attached. Must not mutate `self`.
    fn render(&self, credentials: &Credentials) -> Self::Body;
}

/// A call sent as querystring parameters, answered with JSON.
pub trait RestCall: Call {
    /// Produces the querystring parameters. Must not mutate `self`.
    fn render(&self, credentials: &Credentials) -> Vec<(&'static str, String)>;
}

/// `<RequesterCredentials>` block embedded in XML requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequesterCredentials {
    /// User auth token.
    #[serde(rename = "eBayAuthToken")]
    pub auth_token: String,
}

impl From<&Credentials> for RequesterCredentials {
    fn from(credentials: &Credentials) -> Self {
        Self { auth_token: credentials.auth_token().to_owned() }
    }
}

/// Renders the full XML request document for `call`.
///
/// # Errors
///
/// Returns [`crate::ApiError::XmlEncode`] if the body cannot be serialized.
pub fn render_envelope<C: XmlCall>(call: &C, credentials: &Credentials) -> Result<String> {
    let body = quick_xml::se::to_string_with_root(call.name(), &call.render(credentials))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// Decodes an XML reply body.
///
/// # Errors
///
/// Returns [`crate::ApiError::XmlDecode`] on malformed input.
pub fn parse_xml<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(quick_xml::de::from_reader(body)?)
}

/// Decodes a JSON reply body.
///
/// # Errors
///
/// Returns [`crate::ApiError::JsonDecode`] on malformed input.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
