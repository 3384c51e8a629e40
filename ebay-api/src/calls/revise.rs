//! Listing revisions: `ReviseFixedPriceItem` and `ReviseInventoryStatus`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Item;
use crate::{
    call::RequesterCredentials,
    classify::ErrorRecord,
    error::{ApiError, Result},
};

/// Most revisions one `ReviseInventoryStatus` call accepts.
pub const MAX_INVENTORY_REVISIONS: usize = 4;

/// Revises a fixed-price listing. Only the fields set on `item` change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviseFixedPriceItemRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(rename = "RequesterCredentials", skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    /// Listing changes; `item_id` or `sku` identifies the listing.
    #[serde(rename = "Item")]
    pub item: Item,
}

impl ReviseFixedPriceItemRequest {
    /// Revision carrying `item`.
    #[must_use]
    pub fn new(item: Item) -> Self {
        Self { item, ..Self::default() }
    }
}

/// `ReviseFixedPriceItem` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReviseFixedPriceItemResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Revised listing ID.
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// Revised SKU.
    #[serde(rename = "SKU")]
    pub sku: String,
}

/// Quantity and price for one listing or variation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryStatus {
    /// Listing ID.
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// SKU.
    #[serde(rename = "SKU")]
    pub sku: String,
    /// New quantity.
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// New price.
    #[serde(rename = "StartPrice", skip_serializing_if = "Option::is_none")]
    pub start_price: Option<f64>,
}

/// Revises quantity and price of up to [`MAX_INVENTORY_REVISIONS`]
/// listings in one call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviseInventoryStatusRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(rename = "RequesterCredentials", skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    #[serde(rename = "InventoryStatus")]
    inventory_status: Vec<InventoryStatus>,
}

impl ReviseInventoryStatusRequest {
    /// Builds a request from the first [`MAX_INVENTORY_REVISIONS`] entries of
    /// `revisions`. Later entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if a kept entry lacks an item ID or
    /// SKU.
    pub fn new(revisions: impl IntoIterator<Item = InventoryStatus>) -> Result<Self> {
        let mut inventory_status = Vec::with_capacity(MAX_INVENTORY_REVISIONS);
        for revision in revisions.into_iter().take(MAX_INVENTORY_REVISIONS) {
            if revision.item_id.is_empty() {
                return Err(ApiError::InvalidInput(
                    "ReviseInventoryStatus: ItemID value missing".to_owned(),
                ));
            }
            if revision.sku.is_empty() {
                return Err(ApiError::InvalidInput(
                    "ReviseInventoryStatus: SKU value missing".to_owned(),
                ));
            }
            inventory_status.push(revision);
        }
        Ok(Self { inventory_status, ..Self::default() })
    }

    /// Revisions carried by this request.
    #[must_use]
    pub fn revisions(&self) -> &[InventoryStatus] {
        &self.inventory_status
    }
}

/// `ReviseInventoryStatus` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReviseInventoryStatusResponse {
    /// Server time of the reply.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acknowledgment.
    pub ack: String,
    /// Reported errors and warnings.
    pub errors: Vec<ErrorRecord>,
    /// Resulting state of each revised listing.
    pub inventory_status: Vec<InventoryStatus>,
}

xml_call!(ReviseFixedPriceItemRequest => ReviseFixedPriceItemResponse, "ReviseFixedPriceItem");
api_response!(ReviseFixedPriceItemResponse);

xml_call!(ReviseInventoryStatusRequest => ReviseInventoryStatusResponse, "ReviseInventoryStatus");
api_response!(ReviseInventoryStatusResponse);
