//! `CompleteSale`: mark an order paid or shipped and attach tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{call::RequesterCredentials, classify::ErrorRecord};

/// Updates the post-sale state of an order or line item.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompleteSaleRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    /// Listing ID, with `transaction_id`.
    #[serde(rename = "ItemID", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Order ID.
    #[serde(rename = "OrderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Line item ID.
    #[serde(rename = "OrderLineItemID", skip_serializing_if = "Option::is_none")]
    pub order_line_item_id: Option<String>,
    /// Mark paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    /// Tracking data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment: Option<Shipment>,
    /// Mark shipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped: Option<bool>,
    /// Transaction ID, with `item_id`.
    #[serde(rename = "TransactionID", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl CompleteSaleRequest {
    /// Request targeting `order_id`.
    pub fn for_order(order_id: impl Into<String>) -> Self {
        Self { order_id: Some(order_id.into()), ..Self::default() }
    }
}

/// Shipment details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipment {
    /// One entry per package.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shipment_tracking_details: Vec<ShipmentTrackingDetails>,
    /// Ship time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_time: Option<DateTime<Utc>>,
}

/// Tracking for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentTrackingDetails {
    /// Contents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_line_item: Option<ShipmentLineItem>,
    /// Tracking number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_tracking_number: Option<String>,
    /// Carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_carrier_used: Option<String>,
}

/// Package contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipmentLineItem {
    /// Lines.
    #[serde(rename = "LineItem")]
    pub line_items: Vec<LineItem>,
}

/// One packed line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    /// Country of origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Listing ID.
    #[serde(rename = "ItemID", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// Transaction ID.
    #[serde(rename = "TransactionID", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// `CompleteSale` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompleteSaleResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
}

xml_call!(CompleteSaleRequest => CompleteSaleResponse, "CompleteSale");
api_response!(CompleteSaleResponse);
