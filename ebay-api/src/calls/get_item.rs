//! `GetItem`: a single listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Item;
use crate::{call::RequesterCredentials, classify::ErrorRecord};

/// Fetches one listing by ID.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetItemRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(rename = "RequesterCredentials", skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    /// Listing ID.
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// `ReturnAll`, `ItemReturnAttributes`, ...
    #[serde(rename = "DetailLevel", skip_serializing_if = "Vec::is_empty")]
    pub detail_level: Vec<String>,
}

impl GetItemRequest {
    /// Request for `item_id`.
    pub fn new(item_id: impl Into<String>) -> Self {
        Self { item_id: item_id.into(), ..Self::default() }
    }
}

/// `GetItem` reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetItemResponse {
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
    /// The listing.
    pub item: Item,
}

xml_call!(GetItemRequest => GetItemResponse, "GetItem");
api_response!(GetItemResponse);
