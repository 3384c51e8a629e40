//! Client Alerts calls.
//!
//! `GetClientAlertsAuthToken` is a Trading (XML) call. `Login` and
//! `GetUserAlerts` go to the Client Alerts REST endpoint with querystring
//! parameters and answer in JSON, where error codes are strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    call::{Call, RequesterCredentials, RestCall, parse_json},
    classify::ErrorRecord,
    credentials::Credentials,
    error::Result,
};

/// `version` parameter sent with `Login`.
pub const LOGIN_API_VERSION: &str = "957";

/// Fetches a token for the Client Alerts API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetClientAlertsAuthTokenRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(rename = "RequesterCredentials", skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
}

/// `GetClientAlertsAuthToken` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetClientAlertsAuthTokenResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Token for [`LoginRequest`].
    pub client_alerts_auth_token: String,
    /// Token expiry.
    pub hard_expiration_time: Option<DateTime<Utc>>,
}

xml_call!(
    GetClientAlertsAuthTokenRequest => GetClientAlertsAuthTokenResponse,
    "GetClientAlertsAuthToken"
);
api_response!(GetClientAlertsAuthTokenResponse);

/// Opens a Client Alerts session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    /// Token from `GetClientAlertsAuthToken`.
    pub client_alerts_auth_token: String,
}

/// `Login` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoginResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Session ID for later calls.
    #[serde(rename = "SessionID")]
    pub session_id: String,
    /// Opaque session state for the next call.
    pub session_data: String,
    /// Server build.
    pub build: String,
    /// Correlation ID.
    #[serde(rename = "CorrelationID")]
    pub correlation_id: String,
    /// Schema version.
    pub version: String,
}

impl Call for LoginRequest {
    type Response = LoginResponse;

    fn name(&self) -> &'static str {
        "Login"
    }

    fn parse(&self, body: &[u8]) -> Result<LoginResponse> {
        parse_json(body)
    }
}

impl RestCall for LoginRequest {
    fn render(&self, credentials: &Credentials) -> Vec<(&'static str, String)> {
        vec![
            ("version", LOGIN_API_VERSION.to_owned()),
            ("appid", credentials.app_id().to_owned()),
            ("callname", self.name().to_owned()),
            ("ClientAlertsAuthToken", self.client_alerts_auth_token.clone()),
        ]
    }
}

api_response!(LoginResponse);

/// Polls alerts for an open session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserAlertsRequest {
    /// From `Login`.
    pub session_id: String,
    /// From the previous `Login` or `GetUserAlerts` reply.
    pub session_data: String,
}

impl Call for GetUserAlertsRequest {
    type Response = GetUserAlertsResponse;

    fn name(&self) -> &'static str {
        "GetUserAlerts"
    }

    fn parse(&self, body: &[u8]) -> Result<GetUserAlertsResponse> {
        parse_json(body)
    }
}

impl RestCall for GetUserAlertsRequest {
    fn render(&self, _credentials: &Credentials) -> Vec<(&'static str, String)> {
        vec![
            ("callname", self.name().to_owned()),
            ("SessionID", self.session_id.clone()),
            ("SessionData", self.session_data.clone()),
        ]
    }
}

/// `GetUserAlerts` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetUserAlertsResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Server build.
    pub build: String,
    /// Schema version.
    pub version: String,
    /// Alerts since the last poll.
    pub client_alerts: ClientAlerts,
    /// Session state for the next poll.
    pub session_data: String,
}

api_response!(GetUserAlertsResponse);

/// Alert container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientAlerts {
    /// Events.
    pub client_alert_event: Vec<ClientAlertEvent>,
}

/// One alert.
///
/// Fixed-price sales are decoded; other event payloads are kept as raw
/// JSON in `other`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientAlertEvent {
    /// `FixedPriceTransaction`, `EndOfAuction`, ...
    #[serde(default)]
    pub event_type: String,
    /// Present for fixed-price sales.
    #[serde(default)]
    pub fixed_price_transaction: Option<FixedPriceTransaction>,
    /// Remaining event fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A fixed-price sale alert.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FixedPriceTransaction {
    /// Event type.
    pub event_type: String,
    /// Event time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Listing ID.
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// Bids so far.
    pub bid_count: i64,
    /// Seller.
    #[serde(rename = "SellerUserID")]
    pub seller_user_id: String,
    /// Listing end.
    pub end_time: Option<DateTime<Utc>>,
    /// Price.
    pub current_price: AlertAmount,
    /// Title.
    pub title: String,
    /// Gallery image.
    #[serde(rename = "GalleryURL")]
    pub gallery_url: String,
    /// Quantity.
    pub quantity: i64,
    /// Sales in this alert.
    pub transaction: Vec<AlertTransaction>,
}

/// Monetary amount in JSON alerts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertAmount {
    /// Amount.
    #[serde(rename = "Value")]
    pub value: f64,
    /// ISO 4217 code.
    #[serde(rename = "CurrencyID")]
    pub currency_id: String,
}

/// One sale inside a fixed-price alert.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlertTransaction {
    /// Amount paid.
    pub amount_paid: AlertAmount,
    /// Units sold.
    pub quantity_sold: i64,
    /// Buyer.
    #[serde(rename = "BuyerUserID")]
    pub buyer_user_id: String,
    /// Transaction ID.
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    /// Sale time.
    pub created_date: Option<DateTime<Utc>>,
    /// Line item ID.
    #[serde(rename = "OrderLineItemID")]
    pub order_line_item_id: String,
    /// Enclosing order.
    pub containing_order: ContainingOrder,
}

/// Order reference inside an alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainingOrder {
    /// Order ID.
    #[serde(rename = "OrderID")]
    pub order_id: String,
}
