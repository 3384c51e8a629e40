//! Error types for the eBay API client.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error
//! side is [`ApiError`]. All variants implement [`std::error::Error`] via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Transport errors** ([`ApiError::Transport`]): connection, timeout or
//!   body-read failures. Always fatal to the single call.
//! - **HTTP status errors** ([`ApiError::HttpStatus`]): a non-200 reply on the
//!   XML path. Carries the status code and raw body.
//! - **Codec errors** ([`ApiError::XmlDecode`], [`ApiError::JsonDecode`],
//!   [`ApiError::XmlEncode`]): malformed payloads.
//! - **API errors** ([`ApiError::Api`]): a well-formed reply whose `Ack` is
//!   `Failure`. Carries the structured error sequence, see
//!   [`crate::classify`].
//! - **Input and configuration errors** ([`ApiError::InvalidInput`],
//!   [`ApiError::Config`]): rejected before any network round trip.
//!
//! # Examples
//!
//! ```
//! use ebay_api::error::{ApiError, Result};
//!
//! fn require_sku(sku: &str) -> Result<&str> {
//!     if sku.is_empty() {
//!         return Err(ApiError::InvalidInput("SKU value missing".to_owned()));
//!     }
//!     Ok(sku)
//! }
//!
//! assert!(require_sku("").is_err());
//! ```

use thiserror::Error;

use crate::classify::ApiErrors;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the eBay APIs.
///
/// # Error Recovery
///
/// - **Transient errors** ([`Transport`](Self::Transport), 5xx
///   [`HttpStatus`](Self::HttpStatus), revision conflicts inside
///   [`Api`](Self::Api)): retry, see [`crate::reliability::is_retryable`].
/// - **Listing-state errors** (ended or deleted listings inside
///   [`Api`](Self::Api)): update local state, do not retry.
/// - **Everything else**: fix the input or configuration.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, body read).
    ///
    /// Wraps [`reqwest::Error`].
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-200 reply on the XML path.
    ///
    /// The body is kept verbatim and never parsed as a typed response.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebay_api::error::ApiError;
    ///
    /// let err = ApiError::HttpStatus { status: 500, body: "Internal Error".to_owned() };
    /// assert_eq!(err.to_string(), "500 - Internal Error");
    /// ```
    #[error("{status} - {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw reply body (lossy UTF-8).
        body: String,
    },

    /// The reply body was not valid XML for the expected response type.
    #[error("failed to decode XML response: {0}")]
    XmlDecode(#[from] quick_xml::DeError),

    /// The request body could not be rendered as XML.
    #[error("failed to encode XML request: {0}")]
    XmlEncode(#[from] quick_xml::SeError),

    /// The reply body was not valid JSON for the expected response type.
    #[error("failed to decode JSON response: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// The API acknowledged the call with `Failure`.
    ///
    /// `errors` preserves the order in which the API reported them. The rest
    /// of the reply is discarded; use
    /// [`EbayClient::execute_unchecked`](crate::EbayClient::execute_unchecked)
    /// when a failed reply's other fields are needed.
    #[error("{call} failed: {errors}")]
    Api {
        /// Name of the call that failed.
        call: &'static str,
        /// Structured errors from the response envelope.
        errors: ApiErrors,
    },

    /// A call was rejected by its own validation before dispatch.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client or transport configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The caller's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Returns the structured API errors if this is an [`ApiError::Api`].
    #[must_use]
    pub fn api_errors(&self) -> Option<&ApiErrors> {
        match self {
            Self::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ErrorRecord;

    #[test]
    fn test_http_status_display_contains_status_and_body() {
        let error = ApiError::HttpStatus { status: 503, body: "<html>down</html>".to_owned() };
        let rendered = error.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("<html>down</html>"));
    }

    #[test]
    fn test_invalid_input_display() {
        let error = ApiError::InvalidInput("ItemID value missing".to_owned());
        assert_eq!(error.to_string(), "invalid input: ItemID value missing");
    }

    #[test]
    fn test_api_error_display_lists_records() {
        let errors = ApiErrors::from(vec![ErrorRecord {
            short_message: "Item not found.".to_owned(),
            long_message: "The item was deleted.".to_owned(),
            error_code: 17,
            severity_code: "Error".to_owned(),
            error_classification: "RequestError".to_owned(),
        }]);
        let error = ApiError::Api { call: "GetItem", errors };

        let rendered = error.to_string();
        assert!(rendered.starts_with("GetItem failed: "));
        assert!(rendered.contains("code 17"));
        assert!(rendered.contains("Item not found."));
    }

    #[test]
    fn test_api_errors_accessor() {
        let error = ApiError::Api { call: "GetItem", errors: ApiErrors::default() };
        assert!(error.api_errors().is_some());
        assert!(ApiError::Cancelled.api_errors().is_none());
    }
}
