//! `GetOrders`: paginated order retrieval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Pagination, PaginationResult, Price};
use crate::{
    call::RequesterCredentials,
    classify::ErrorRecord,
    pagination::{PaginatedCall, PaginatedResponse},
};

/// Fields requested by [`GetOrdersRequest::default_output_selection`].
const ORDER_OUTPUT_SELECTORS: &[&str] = &[
    "HasMoreOrders",
    "PageNumber",
    "PaginationResult",
    "OrderArray.Order.OrderID",
    "OrderArray.Order.OrderStatus",
    "OrderArray.Order.ShippedTime",
    "OrderArray.Order.TransactionArray.Transaction.Buyer.UserFirstName",
    "OrderArray.Order.TransactionArray.Transaction.Buyer.UserLastName",
    "OrderArray.Order.TransactionArray.Transaction.Buyer.Email",
    "OrderArray.Order.MonetaryDetails.Payments.Payment.ReferenceID",
    "OrderArray.Order.ShippingDetails.SellingManagerSalesRecordNumber",
    "OrderArray.Order.Total",
    "OrderArray.Order.ShippingAddress.Name",
    "OrderArray.Order.ShippingAddress.Street1",
    "OrderArray.Order.ShippingAddress.Street2",
    "OrderArray.Order.ShippingAddress.CityName",
    "OrderArray.Order.ShippingAddress.StateOrProvince",
    "OrderArray.Order.ShippingAddress.PostalCode",
    "OrderArray.Order.ShippingAddress.Phone",
    "OrderArray.Order.TransactionArray.Transaction.Item.SKU",
    "OrderArray.Order.TransactionArray.Transaction.TransactionID",
    "OrderArray.Order.TransactionArray.Transaction.QuantityPurchased",
];

/// Retrieves orders by time window, status or ID.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetOrdersRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    /// Orders created at or after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_from: Option<DateTime<Utc>>,
    /// Orders created at or before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_to: Option<DateTime<Utc>>,
    /// Include final value fees in the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_final_value_fee: Option<bool>,
    /// Orders modified at or after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_time_from: Option<DateTime<Utc>>,
    /// Orders modified at or before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_time_to: Option<DateTime<Utc>>,
    /// Orders modified in the last N days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days: Option<u32>,
    /// Specific orders.
    #[serde(rename = "OrderIDArray", skip_serializing_if = "Option::is_none")]
    pub order_id_array: Option<OrderIdArray>,
    /// `Active`, `Completed`, `All`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    /// Page selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// `Ascending` or `Descending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting_order: Option<String>,
    /// Detail levels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detail_level: Vec<String>,
    /// Restricts the reply to these field paths.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_selector: Vec<String>,
}

impl GetOrdersRequest {
    /// Copy of this request limited to the fields needed for order entry.
    #[must_use]
    pub fn default_output_selection(&self) -> Self {
        Self {
            detail_level: vec!["ReturnAll".to_owned()],
            output_selector: ORDER_OUTPUT_SELECTORS.iter().map(|&s| s.to_owned()).collect(),
            ..self.clone()
        }
    }
}

/// Order IDs to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderIdArray {
    /// IDs.
    #[serde(rename = "OrderID")]
    pub order_ids: Vec<String>,
}

/// `GetOrders` reply page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetOrdersResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Schema version.
    pub version: String,
    /// Server build.
    pub build: String,
    /// Page totals.
    pub pagination_result: PaginationResult,
    /// More pages follow this one.
    pub has_more_orders: bool,
    /// Orders on this page.
    pub order_array: OrderArray,
    /// Page size.
    pub orders_per_page: u32,
    /// This page's number.
    pub page_number: u32,
    /// Orders actually returned.
    pub returned_order_count_actual: u32,
}

/// Orders on one page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderArray {
    /// Orders.
    #[serde(rename = "Order", default)]
    pub orders: Vec<Order>,
}

/// One order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Order {
    /// Order ID.
    #[serde(rename = "OrderID")]
    pub order_id: String,
    /// `Active`, `Completed`, `Cancelled`, ...
    pub order_status: String,
    /// Buyer's user ID.
    #[serde(rename = "BuyerUserID")]
    pub buyer_user_id: String,
    /// Creation time.
    pub created_time: Option<DateTime<Utc>>,
    /// Shipment time, if shipped.
    pub shipped_time: Option<DateTime<Utc>>,
    /// Payment details.
    pub monetary_details: MonetaryDetails,
    /// Seller-side shipping data.
    pub shipping_details: OrderShippingDetails,
    /// Destination.
    pub shipping_address: Address,
    /// Order total.
    pub total: Option<Price>,
    /// Line items.
    pub transaction_array: TransactionArray,
}

/// Payment summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonetaryDetails {
    /// Payments.
    pub payments: Payments,
}

/// Payment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Payments {
    /// Payments.
    #[serde(rename = "Payment", default)]
    pub payments: Vec<Payment>,
}

/// One payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// External payment reference.
    #[serde(rename = "ReferenceID")]
    pub reference_id: String,
}

/// Order-level shipping data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderShippingDetails {
    /// Selling Manager record number.
    pub selling_manager_sales_record_number: String,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    /// Recipient.
    pub name: String,
    /// First street line.
    pub street1: String,
    /// Second street line.
    pub street2: String,
    /// City.
    pub city_name: String,
    /// State or province.
    pub state_or_province: String,
    /// Two-letter country code.
    pub country: String,
    /// Country display name.
    pub country_name: String,
    /// Phone.
    pub phone: String,
    /// Postal code.
    pub postal_code: String,
    /// Address ID.
    #[serde(rename = "AddressID")]
    pub address_id: String,
}

/// Line items of an order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionArray {
    /// Line items.
    #[serde(rename = "Transaction", default)]
    pub transactions: Vec<Transaction>,
}

/// One line item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Transaction {
    /// Transaction ID.
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    /// Line item ID.
    #[serde(rename = "OrderLineItemID")]
    pub order_line_item_id: String,
    /// Buyer.
    pub buyer: Buyer,
    /// Creation time.
    pub created_date: Option<DateTime<Utc>>,
    /// Purchased listing.
    pub item: TransactionItem,
    /// Units bought.
    pub quantity_purchased: i64,
}

/// Buyer contact data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Buyer {
    /// Email.
    pub email: String,
    /// First name.
    pub user_first_name: String,
    /// Last name.
    pub user_last_name: String,
}

/// Listing reference inside a line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TransactionItem {
    /// Listing ID.
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// Site.
    pub site: String,
    /// Title.
    pub title: String,
    /// SKU.
    #[serde(rename = "SKU")]
    pub sku: String,
    /// Condition ID.
    #[serde(rename = "ConditionID")]
    pub condition_id: Option<i64>,
    /// Condition display name.
    pub condition_display_name: String,
}

xml_call!(GetOrdersRequest => GetOrdersResponse, "GetOrders");
api_response!(GetOrdersResponse);

impl PaginatedCall for GetOrdersRequest {
    fn with_page(&self, page: u32) -> Self {
        Self {
            pagination: Some(Pagination::at_page(self.pagination.as_ref(), page)),
            ..self.clone()
        }
    }
}

impl PaginatedResponse for GetOrdersResponse {
    type Item = Order;

    fn has_more(&self) -> bool {
        self.has_more_orders
    }

    fn total_pages(&self) -> u32 {
        self.pagination_result.total_number_of_pages
    }

    fn into_items(self) -> Vec<Order> {
        self.order_array.orders
    }
}
