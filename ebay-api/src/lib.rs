//! Typed client for the eBay Trading and Client Alerts APIs.
//!
//! Two wire protocols sit behind one call contract:
//!
//! - **Trading API**: XML envelopes POSTed to `/ws/api.dll`, with
//!   credentials and call metadata in `X-EBAY-API-*` headers.
//! - **Client Alerts API**: querystring parameters, JSON replies.
//!
//! Every call is a typed request ([`call::Call`]) paired with a typed reply
//! ([`call::Response`]). Replies expose their acknowledgment and a
//! structured error sequence that [`classify`] turns into named conditions
//! (revision conflict, listing ended, listing deleted).
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────┐  ┌────────────────────────┐
//! │      TradingApi        │  │    ClientAlertsApi     │
//! └───────────┬────────────┘  └───────────┬────────────┘
//!             │                           │
//! ┌───────────▼───────────────────────────▼────────────┐
//! │ EbayClient: execute / execute_rest / execute_all    │
//! │   XML envelope + headers │ querystring + JSON       │
//! └───────────┬────────────────────────────────────────┘
//!             │ sealed Transport (reqwest)
//!             ▼
//!        eBay endpoints
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ebay_api::{ClientConfig, Credentials, EbayClient, TradingApi, calls::GetOrdersRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> ebay_api::error::Result<()> {
//! let config = ClientConfig::from_file("ebay.toml")?;
//! let client = EbayClient::new(Credentials::from_env()?, config)?;
//! let trading = TradingApi::new(client);
//!
//! let mut request = GetOrdersRequest::default().default_output_selection();
//! request.number_of_days = Some(7);
//!
//! let orders = trading.get_orders(&CancellationToken::new(), &request).await?;
//! println!("{} orders, {} pages dropped", orders.items.len(), orders.failed_pages.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! All operations return [`error::Result`]. A reply whose `Ack` is `Failure`
//! becomes [`ApiError::Api`] on the XML path; inspect it with
//! [`ApiError::api_errors`]. REST replies are handed back as-is.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod call;
pub mod calls;
pub mod classify;
pub mod client;
pub mod client_alerts;
pub mod config;
pub mod credentials;
pub mod error;
pub mod observability;
pub mod pagination;
pub mod reliability;
pub mod trading;
pub mod transport;

#[cfg(test)]
mod testing;

pub use call::{Call, Response, RestCall, XmlCall};
pub use classify::{ApiErrors, ErrorCategory, ErrorCondition, ErrorRecord};
pub use client::EbayClient;
pub use client_alerts::ClientAlertsApi;
pub use config::{ClientConfig, Environment, PaginationConfig};
pub use credentials::Credentials;
pub use error::{ApiError, Result};
pub use pagination::{Aggregate, PaginatedCall, PaginatedResponse};
pub use trading::TradingApi;
pub use transport::{HttpConfig, HttpMethod, HttpTransport};
