//! `GetMyeBaySelling`: the seller's active listings, paginated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Item, Pagination, PaginationResult};
use crate::{
    call::RequesterCredentials,
    classify::ErrorRecord,
    pagination::{PaginatedCall, PaginatedResponse},
};

/// Fields requested by [`GetMyeBaySellingRequest::default_output_selection`].
const SELLING_OUTPUT_SELECTORS: &[&str] = &[
    "ActiveList.ItemArray.Item.SKU",
    "ActiveList.ItemArray.Item.ItemID",
    "ActiveList.ItemArray.Item.Title",
    "ActiveList.ItemArray.Item.QuantityAvailable",
    "ActiveList.ItemArray.Item.SellingStatus.CurrentPrice",
    "ActiveList.PaginationResult.TotalNumberOfEntries",
    "ActiveList.PaginationResult.TotalNumberOfPages",
];

/// Lists the seller's listings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMyeBaySellingRequest {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requester_credentials: Option<RequesterCredentials>,
    /// Active listings container selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_list: Option<ActiveListRequest>,
    /// Detail levels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detail_level: Vec<String>,
    /// Restricts the reply to these field paths.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_selector: Vec<String>,
}

impl GetMyeBaySellingRequest {
    /// Request for the active list.
    #[must_use]
    pub fn active() -> Self {
        Self {
            active_list: Some(ActiveListRequest {
                include: Some(true),
                ..ActiveListRequest::default()
            }),
            ..Self::default()
        }
    }

    /// Copy of this request limited to SKU, ID, title, quantity, price and
    /// page totals.
    #[must_use]
    pub fn default_output_selection(&self) -> Self {
        Self {
            output_selector: SELLING_OUTPUT_SELECTORS.iter().map(|&s| s.to_owned()).collect(),
            ..self.clone()
        }
    }
}

/// Active list selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActiveListRequest {
    /// Include this container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<bool>,
    /// Include seller notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_notes: Option<bool>,
    /// `FixedPriceItem`, `Auction`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    /// Page selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// `GetMyeBaySelling` reply page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetMyeBaySellingResponse {
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
    /// Active listings.
    pub active_list: ActiveList,
}

/// Active listings on one page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActiveList {
    /// Listings.
    pub item_array: ItemArray,
    /// Page totals.
    pub pagination_result: PaginationResult,
}

/// Listing container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemArray {
    /// Listings.
    #[serde(rename = "Item", default)]
    pub items: Vec<Item>,
}

xml_call!(GetMyeBaySellingRequest => GetMyeBaySellingResponse, "GetMyeBaySelling");
api_response!(GetMyeBaySellingResponse);

impl PaginatedCall for GetMyeBaySellingRequest {
    fn with_page(&self, page: u32) -> Self {
        let mut active_list = self.active_list.clone().unwrap_or_else(|| ActiveListRequest {
            include: Some(true),
            ..ActiveListRequest::default()
        });
        active_list.pagination = Some(Pagination::at_page(active_list.pagination.as_ref(), page));
        Self { active_list: Some(active_list), ..self.clone() }
    }
}

impl PaginatedResponse for GetMyeBaySellingResponse {
    type Item = Item;

    fn has_more(&self) -> bool {
        self.total_pages() > 1
    }

    fn total_pages(&self) -> u32 {
        self.active_list.pagination_result.total_number_of_pages
    }

    fn into_items(self) -> Vec<Item> {
        self.active_list.item_array.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        call::{Call, render_envelope},
        credentials::Credentials,
    };

    #[test]
    fn test_render_paged_active_list() {
        let request = GetMyeBaySellingRequest::active().default_output_selection().with_page(2);
        let xml = render_envelope(&request, &Credentials::new("d", "a", "c", "tok")).unwrap();

        assert!(xml.contains(r#"<GetMyeBaySelling xmlns="urn:ebay:apis:eBLBaseComponents">"#));
        assert!(xml.contains(
            "<ActiveList><Include>true</Include>\
             <Pagination><PageNumber>2</PageNumber></Pagination></ActiveList>"
        ));
        assert!(xml.contains("<OutputSelector>ActiveList.ItemArray.Item.SKU</OutputSelector>"));
    }

    #[test]
    fn test_with_page_creates_active_list() {
        let paged = GetMyeBaySellingRequest::default().with_page(1);
        let active_list = paged.active_list.unwrap();
        assert_eq!(active_list.include, Some(true));
        assert_eq!(active_list.pagination.unwrap().page_number, Some(1));
    }

    #[test]
    fn test_parse_and_pagination_signal() {
        let body = br#"<GetMyeBaySellingResponse xmlns="urn:ebay:apis:eBLBaseComponents">
              <Ack>Success</Ack>
              <ActiveList>
                <ItemArray>
                  <Item>
                    <ItemID>110</ItemID>
                    <SKU>ABC-1</SKU>
                    <Title>Widget</Title>
                    <QuantityAvailable>5</QuantityAvailable>
                    <SellingStatus>
                      <CurrentPrice currencyID="USD">9.99</CurrentPrice>
                    </SellingStatus>
                  </Item>
                  <Item><ItemID>111</ItemID><SKU>ABC-2</SKU></Item>
                </ItemArray>
                <PaginationResult>
                  <TotalNumberOfPages>2</TotalNumberOfPages>
                  <TotalNumberOfEntries>4</TotalNumberOfEntries>
                </PaginationResult>
              </ActiveList>
            </GetMyeBaySellingResponse>"#;

        let response = GetMyeBaySellingRequest::active().parse(body).unwrap();
        assert!(response.has_more());
        assert_eq!(response.total_pages(), 2);

        let items = response.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Widget");
        assert_eq!(items[0].quantity_available, Some(5));
        assert_eq!(items[1].sku, "ABC-2");
    }

    #[test]
    fn test_single_page_has_no_more() {
        let body = b"<GetMyeBaySellingResponse><Ack>Success</Ack><ActiveList><PaginationResult>\
                     <TotalNumberOfPages>1</TotalNumberOfPages></PaginationResult></ActiveList>\
                     </GetMyeBaySellingResponse>";
        let response = GetMyeBaySellingRequest::active().parse(body).unwrap();
        assert!(!response.has_more());
    }
}
