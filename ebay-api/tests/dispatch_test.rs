//! End-to-end dispatch over the reqwest transport against a mock server.

use ebay_api::{
    ApiError, ClientAlertsApi, ClientConfig, Credentials, EbayClient, HttpConfig, PaginationConfig,
    Response, TradingApi,
    calls::{GetItemRequest, GetOrdersRequest, LoginRequest},
    transport::{HttpMethod, HttpVersion},
};
use httpmock::prelude::*;
use tokio_util::sync::CancellationToken;

fn credentials() -> Credentials {
    Credentials::new("dev-id", "app-id", "cert-id", "auth-token")
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: Some(server.base_url()),
        client_alerts_url: server.url("/ws/ecasvc/ClientAlerts"),
        site_id: 3,
        http: HttpConfig {
            http_version: HttpVersion::Http1,
            timeout_secs: 5,
            ..HttpConfig::default()
        },
        pagination: PaginationConfig { stagger_ms: 5, retry_backoff_ms: 5, retries: 1 },
        ..ClientConfig::default()
    }
}

fn client(server: &MockServer) -> EbayClient {
    EbayClient::new(credentials(), config(server)).expect("valid test config")
}

fn orders_page(page: u32, total: u32) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <GetOrdersResponse xmlns=\"urn:ebay:apis:eBLBaseComponents\">\
         <Ack>Success</Ack>\
         <PaginationResult><TotalNumberOfPages>{total}</TotalNumberOfPages></PaginationResult>\
         <HasMoreOrders>{}</HasMoreOrders>\
         <OrderArray><Order><OrderID>order-{page}</OrderID></Order></OrderArray>\
         </GetOrdersResponse>",
        page < total
    )
}

#[tokio::test]
async fn test_xml_call_sends_headers_and_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ws/api.dll")
                .header("X-EBAY-API-DEV-NAME", "dev-id")
                .header("X-EBAY-API-APP-NAME", "app-id")
                .header("X-EBAY-API-CERT-NAME", "cert-id")
                .header("X-EBAY-API-CALL-NAME", "GetItem")
                .header("X-EBAY-API-SITEID", "3")
                .header("X-EBAY-API-COMPATIBILITY-LEVEL", "1113")
                .header("content-type", "text/xml")
                .body_includes(r#"<GetItem xmlns="urn:ebay:apis:eBLBaseComponents">"#)
                .body_includes("<eBayAuthToken>auth-token</eBayAuthToken>")
                .body_includes("<ItemID>110</ItemID>");
            then.status(200).body(
                "<GetItemResponse><Ack>Success</Ack>\
                 <Item><ItemID>110</ItemID><Title>Widget</Title></Item></GetItemResponse>",
            );
        })
        .await;

    let response = client(&server).execute(&GetItemRequest::new("110")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.item.title, "Widget");
}

#[tokio::test]
async fn test_non_200_is_http_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ws/api.dll");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let error = client(&server).execute(&GetItemRequest::new("110")).await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::HttpStatus { status: 500, ref body } if body == "Internal Server Error"
    ));
    assert_eq!(error.to_string(), "500 - Internal Server Error");
}

#[tokio::test]
async fn test_failure_ack_is_compound_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ws/api.dll");
            then.status(200).body(
                "<GetItemResponse><Ack>Failure</Ack>\
                 <Errors><ShortMessage>Deleted</ShortMessage><ErrorCode>17</ErrorCode>\
                 <SeverityCode>Error</SeverityCode></Errors>\
                 <Errors><ShortMessage>Ended</ShortMessage><ErrorCode>291</ErrorCode>\
                 <SeverityCode>Error</SeverityCode></Errors>\
                 </GetItemResponse>",
            );
        })
        .await;

    let error = client(&server).execute(&GetItemRequest::new("110")).await.unwrap_err();

    let errors = error.api_errors().expect("api error");
    assert_eq!(errors.len(), 2);
    assert!(errors.listing_deleted());
    assert!(errors.listing_ended());
    assert!(!errors.revision_conflict());

    let rendered = error.to_string();
    assert!(rendered.find("Deleted").unwrap() < rendered.find("Ended").unwrap());
}

#[tokio::test]
async fn test_rest_call_uses_querystring() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ws/ecasvc/ClientAlerts")
                .query_param("version", "957")
                .query_param("appid", "app-id")
                .query_param("callname", "Login")
                .query_param("ClientAlertsAuthToken", "tok-en");
            then.status(200).json_body(serde_json::json!({
                "Ack": "Success",
                "SessionID": "S1",
                "SessionData": "D1"
            }));
        })
        .await;

    let client = client(&server);
    let endpoint = client.config().client_alerts_url.clone();
    let request = LoginRequest { client_alerts_auth_token: "tok-en".to_owned() };
    let response = client.execute_rest(&endpoint, HttpMethod::Get, &request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.session_id, "S1");
}

#[tokio::test]
async fn test_rest_failure_is_returned_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/ecasvc/ClientAlerts");
            then.status(400).json_body(serde_json::json!({
                "Ack": "Failure",
                "Errors": [{
                    "ShortMessage": "Invalid token",
                    "ErrorCode": "931",
                    "SeverityCode": "Error"
                }]
            }));
        })
        .await;

    let mut alerts = ClientAlertsApi::new(client(&server));
    alerts.set_auth_token("expired");
    let response = alerts.login().await.unwrap();

    assert!(response.failed());
    assert_eq!(response.errors().records()[0].error_code, 931);
    assert!(!alerts.is_logged_in());
}

#[tokio::test]
async fn test_paginated_fetch_merges_every_page() {
    let server = MockServer::start_async().await;
    let mut mocks = Vec::new();
    for page in 1..=3 {
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ws/api.dll")
                    .header("X-EBAY-API-CALL-NAME", "GetOrders")
                    .body_includes(format!("<PageNumber>{page}</PageNumber>"));
                then.status(200).body(orders_page(page, 3));
            })
            .await;
        mocks.push(mock);
    }

    let trading = TradingApi::new(client(&server));
    let aggregate =
        trading.get_orders(&CancellationToken::new(), &GetOrdersRequest::default()).await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    let mut ids: Vec<_> = aggregate.items.iter().map(|order| order.order_id.clone()).collect();
    ids.sort();
    assert_eq!(ids, ["order-1", "order-2", "order-3"]);
    assert!(aggregate.is_complete());
}

#[tokio::test]
async fn test_paginated_fetch_drops_page_after_retry() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ws/api.dll").body_includes("<PageNumber>1</PageNumber>");
            then.status(200).body(orders_page(1, 2));
        })
        .await;
    let failing = server
        .mock_async(|when, then| {
            when.method(POST).path("/ws/api.dll").body_includes("<PageNumber>2</PageNumber>");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let aggregate = client(&server)
        .execute_all(&CancellationToken::new(), &GetOrdersRequest::default())
        .await
        .unwrap();

    failing.assert_hits_async(2).await;
    assert_eq!(aggregate.items.len(), 1);
    assert_eq!(aggregate.failed_pages, vec![2]);
}
