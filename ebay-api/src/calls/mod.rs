//! Concrete API calls.
//!
//! Trading API calls travel as XML over [`crate::EbayClient::execute`];
//! Client Alerts calls travel as querystrings over
//! [`crate::EbayClient::execute_rest`]. Each request type carries only the
//! fields this crate uses. Unknown reply elements are ignored.
//!
//! Requests are built with `new` where one or two fields identify the call,
//! or from `Default` with public fields set afterwards:
//!
//! ```
//! use ebay_api::calls::{GetOrdersRequest, Pagination};
//!
//! let mut request = GetOrdersRequest::default().default_output_selection();
//! request.number_of_days = Some(3);
//! request.pagination = Some(Pagination { entries_per_page: Some(100), page_number: None });
//! ```

/// Implements `Call` and `XmlCall` for a request struct that has private
/// `xmlns` and `requester_credentials` fields.
macro_rules! xml_call {
    ($request:ty => $response:ty, $name:literal) => {
        impl $crate::call::Call for $request {
            type Response = $response;

            fn name(&self) -> &'static str {
                $name
            }

            fn parse(&self, body: &[u8]) -> $crate::error::Result<$response> {
                $crate::call::parse_xml(body)
            }
        }

        impl $crate::call::XmlCall for $request {
            type Body = Self;

            fn render(&self, credentials: &$crate::credentials::Credentials) -> Self {
                Self {
                    xmlns: Some($crate::call::XML_NAMESPACE),
                    requester_credentials: Some(credentials.into()),
                    ..self.clone()
                }
            }
        }
    };
}

/// Implements `Response` for a reply struct with `ack` and `errors` fields.
macro_rules! api_response {
    ($response:ty) => {
        impl $crate::call::Response for $response {
            fn ack(&self) -> &str {
                &self.ack
            }

            fn errors(&self) -> $crate::classify::ApiErrors {
                $crate::classify::ApiErrors::from(self.errors.clone())
            }
        }
    };
}

mod client_alerts;
mod common;
mod complete_sale;
mod get_item;
mod get_my_ebay_selling;
mod get_orders;
mod revise;

pub use client_alerts::{
    AlertAmount, AlertTransaction, ClientAlertEvent, ClientAlerts, ContainingOrder,
    FixedPriceTransaction, GetClientAlertsAuthTokenRequest, GetClientAlertsAuthTokenResponse,
    GetUserAlertsRequest, GetUserAlertsResponse, LOGIN_API_VERSION, LoginRequest, LoginResponse,
};
pub use common::{Item, Pagination, PaginationResult, Price, SellingStatus};
pub use complete_sale::{
    CompleteSaleRequest, CompleteSaleResponse, LineItem, Shipment, ShipmentLineItem,
    ShipmentTrackingDetails,
};
pub use get_item::{GetItemRequest, GetItemResponse};
pub use get_my_ebay_selling::{
    ActiveList, ActiveListRequest, GetMyeBaySellingRequest, GetMyeBaySellingResponse, ItemArray,
};
pub use get_orders::{
    Address, Buyer, GetOrdersRequest, GetOrdersResponse, MonetaryDetails, Order, OrderArray,
    OrderIdArray, OrderShippingDetails, Payment, Payments, Transaction, TransactionArray,
    TransactionItem,
};
pub use revise::{
    InventoryStatus, MAX_INVENTORY_REVISIONS, ReviseFixedPriceItemRequest,
    ReviseFixedPriceItemResponse, ReviseInventoryStatusRequest, ReviseInventoryStatusResponse,
};
