//! Types shared by several Trading calls.

use serde::{Deserialize, Serialize};

/// Page request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Pagination {
    /// Entries per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_per_page: Option<u32>,
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl Pagination {
    /// Same page size, different page.
    #[must_use]
    pub fn at_page(current: Option<&Self>, page: u32) -> Self {
        Self {
            entries_per_page: current.and_then(|pagination| pagination.entries_per_page),
            page_number: Some(page),
        }
    }
}

/// Page totals reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PaginationResult {
    /// Total pages available.
    pub total_number_of_pages: u32,
    /// Total entries across all pages.
    pub total_number_of_entries: u32,
}

/// Monetary amount with currency attribute.
///
/// Serialized as `<StartPrice currencyID="USD">9.99</StartPrice>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// ISO 4217 code.
    #[serde(rename = "@currencyID", default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    /// Amount.
    #[serde(rename = "$text")]
    pub value: f64,
}

/// A listing as returned by item and selling queries, and as sent by
/// fixed-price revisions.
///
/// Empty fields are omitted from requests, so a revision only touches what
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Listing ID.
    #[serde(rename = "ItemID", skip_serializing_if = "String::is_empty")]
    pub item_id: String,
    /// Seller's stock keeping unit.
    #[serde(rename = "SKU", skip_serializing_if = "String::is_empty")]
    pub sku: String,
    /// Listing title.
    #[serde(rename = "Title", skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Fixed price.
    #[serde(rename = "StartPrice", skip_serializing_if = "Option::is_none")]
    pub start_price: Option<Price>,
    /// Total quantity listed.
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Quantity still available.
    #[serde(rename = "QuantityAvailable", skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<i64>,
    /// Sales state.
    #[serde(rename = "SellingStatus", skip_serializing_if = "SellingStatus::is_empty")]
    pub selling_status: SellingStatus,
}

/// Sales state of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SellingStatus {
    /// Current price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Price>,
    /// `Active`, `Completed`, `Ended`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_status: Option<String>,
    /// Units sold so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_sold: Option<i64>,
}

impl SellingStatus {
    /// `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current_price.is_none()
            && self.listing_status.is_none()
            && self.quantity_sold.is_none()
    }
}
