//! Trading API facade.
//!
//! Thin wrappers over [`EbayClient`] for the Trading calls this crate
//! models. Each method builds its request, dispatches it on the XML path and
//! returns the typed reply; a `Failure` acknowledgment is an
//! [`ApiError::Api`](crate::ApiError::Api).

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
    calls::{
        CompleteSaleRequest, CompleteSaleResponse, GetItemRequest, GetItemResponse,
        GetMyeBaySellingRequest, GetMyeBaySellingResponse, GetOrdersRequest, InventoryStatus, Item,
        Order, ReviseFixedPriceItemRequest, ReviseFixedPriceItemResponse,
        ReviseInventoryStatusRequest, ReviseInventoryStatusResponse,
    },
    client::EbayClient,
    error::Result,
    pagination::{Aggregate, PaginatedCall},
    transport::{HttpTransport, Transport},
};

/// Trading API operations.
#[derive(Debug, Clone)]
pub struct TradingApi<T: Transport = HttpTransport> {
    client: EbayClient<T>,
}

impl<T: Transport + 'static> TradingApi<T> {
    /// Facade over `client`.
    #[must_use]
    pub fn new(client: EbayClient<T>) -> Self {
        Self { client }
    }

    /// Underlying client.
    #[must_use]
    pub fn client(&self) -> &EbayClient<T> {
        &self.client
    }

    /// Fetches one listing.
    pub async fn get_item(&self, item_id: impl Into<String>) -> Result<GetItemResponse> {
        self.client.execute(&GetItemRequest::new(item_id)).await
    }

    /// Fetches every order matching `request`, across all pages.
    pub async fn get_orders(
        &self,
        cancel: &CancellationToken,
        request: &GetOrdersRequest,
    ) -> Result<Aggregate<Order>> {
        self.client.execute_all(cancel, request).await
    }

    /// Fetches one page of the seller's listings.
    pub async fn get_my_ebay_selling_page(
        &self,
        request: &GetMyeBaySellingRequest,
        page: u32,
    ) -> Result<GetMyeBaySellingResponse> {
        self.client.execute(&request.with_page(page)).await
    }

    /// Fetches every page of the seller's listings.
    pub async fn get_my_ebay_selling_all(
        &self,
        cancel: &CancellationToken,
        request: &GetMyeBaySellingRequest,
    ) -> Result<Aggregate<Item>> {
        self.client.execute_all(cancel, request).await
    }

    /// Revises the fields set on `item`.
    pub async fn revise_fixed_price_item(
        &self,
        item: Item,
    ) -> Result<ReviseFixedPriceItemResponse> {
        self.client.execute(&ReviseFixedPriceItemRequest::new(item)).await
    }

    /// Revises quantity and price of up to four listings.
    ///
    /// Entries past the fourth are ignored. Validation runs before any
    /// request is sent.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidInput`](crate::ApiError::InvalidInput) if a kept
    /// entry has no item ID or SKU, otherwise as [`EbayClient::execute`].
    #[instrument(skip_all)]
    pub async fn revise_inventory_status(
        &self,
        revisions: impl IntoIterator<Item = InventoryStatus>,
    ) -> Result<ReviseInventoryStatusResponse> {
        let request = ReviseInventoryStatusRequest::new(revisions)?;
        self.client.execute(&request).await
    }

    /// Updates paid or shipped state of an order.
    pub async fn complete_sale(
        &self,
        request: &CompleteSaleRequest,
    ) -> Result<CompleteSaleResponse> {
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ApiError,
        testing::{FakeTransport, test_client},
    };

    fn trading(transport: FakeTransport) -> (TradingApi<FakeTransport>, FakeTransport) {
        let (client, transport) = test_client(transport);
        (TradingApi::new(client), transport)
    }

    fn selling_page(page: u32, total: u32) -> String {
        format!(
            "<GetMyeBaySellingResponse><Ack>Success</Ack><ActiveList>\
             <ItemArray><Item><ItemID>{page}</ItemID><SKU>SKU-{page}</SKU></Item></ItemArray>\
             <PaginationResult><TotalNumberOfPages>{total}</TotalNumberOfPages></PaginationResult>\
             </ActiveList></GetMyeBaySellingResponse>"
        )
    }

    #[tokio::test]
    async fn test_get_item() {
        let (api, transport) = trading(FakeTransport::replying(
            200,
            "<GetItemResponse><Ack>Success</Ack>\
             <Item><ItemID>110</ItemID><Title>Widget</Title></Item></GetItemResponse>",
        ));

        let response = api.get_item("110").await.unwrap();
        assert_eq!(response.item.title, "Widget");

        let requests = transport.requests();
        assert_eq!(requests[0].header("X-EBAY-API-CALL-NAME"), Some("GetItem"));
        assert!(requests[0].body.contains("<ItemID>110</ItemID>"));
    }

    #[tokio::test]
    async fn test_revise_inventory_status_validates_before_dispatch() {
        let (api, transport) = trading(FakeTransport::replying(200, ""));

        let missing_sku =
            InventoryStatus { item_id: "110".to_owned(), ..InventoryStatus::default() };
        let error = api.revise_inventory_status([missing_sku]).await.unwrap_err();

        assert!(matches!(error, ApiError::InvalidInput(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_revise_inventory_status_sends_at_most_four() {
        let (api, transport) = trading(FakeTransport::replying(
            200,
            "<ReviseInventoryStatusResponse><Ack>Success</Ack></ReviseInventoryStatusResponse>",
        ));

        let revisions = (1..=5).map(|n| InventoryStatus {
            item_id: n.to_string(),
            sku: format!("SKU-{n}"),
            quantity: Some(1),
            start_price: None,
        });
        api.revise_inventory_status(revisions).await.unwrap();

        let body = &transport.requests()[0].body;
        assert_eq!(body.matches("<InventoryStatus>").count(), 4);
        assert!(!body.contains("SKU-5"));
    }

    #[tokio::test]
    async fn test_revise_fixed_price_item_listing_ended() {
        let (api, _) = trading(FakeTransport::replying(
            200,
            "<ReviseFixedPriceItemResponse><Ack>Failure</Ack>\
             <Errors><ErrorCode>291</ErrorCode></Errors></ReviseFixedPriceItemResponse>",
        ));

        let item = Item { item_id: "110".to_owned(), quantity: Some(2), ..Item::default() };
        let error = api.revise_fixed_price_item(item).await.unwrap_err();
        assert!(error.api_errors().unwrap().listing_ended());
    }

    #[tokio::test]
    async fn test_complete_sale() {
        let (api, transport) = trading(FakeTransport::replying(
            200,
            "<CompleteSaleResponse><Ack>Success</Ack></CompleteSaleResponse>",
        ));

        let mut request = CompleteSaleRequest::for_order("123-456");
        request.paid = Some(true);
        api.complete_sale(&request).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].header("X-EBAY-API-CALL-NAME"), Some("CompleteSale"));
        assert!(requests[0].body.contains("<Paid>true</Paid>"));
    }

    #[tokio::test]
    async fn test_get_my_ebay_selling_page() {
        let (api, transport) =
            trading(FakeTransport::new(|request| (200, selling_page(request.page(), 3))));

        let response =
            api.get_my_ebay_selling_page(&GetMyeBaySellingRequest::active(), 2).await.unwrap();
        assert_eq!(response.active_list.item_array.items[0].item_id, "2");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_my_ebay_selling_all() {
        let (api, transport) =
            trading(FakeTransport::new(|request| (200, selling_page(request.page(), 3))));

        let aggregate = api
            .get_my_ebay_selling_all(&CancellationToken::new(), &GetMyeBaySellingRequest::active())
            .await
            .unwrap();

        let mut ids: Vec<_> = aggregate.items.iter().map(|item| item.item_id.clone()).collect();
        ids.sort();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(aggregate.is_complete());
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_orders_single_page() {
        let (api, _) = trading(FakeTransport::replying(
            200,
            "<GetOrdersResponse><Ack>Success</Ack><HasMoreOrders>false</HasMoreOrders>\
             <OrderArray><Order><OrderID>1-a</OrderID></Order></OrderArray></GetOrdersResponse>",
        ));

        let aggregate =
            api.get_orders(&CancellationToken::new(), &GetOrdersRequest::default()).await.unwrap();
        assert_eq!(aggregate.items.len(), 1);
        assert_eq!(aggregate.items[0].order_id, "1-a");
    }
}
