//! In-process transport double for unit tests.
//!
//! Records every request and answers through a closure, so dispatcher and
//! aggregator tests run without sockets.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    client::EbayClient,
    config::ClientConfig,
    credentials::Credentials,
    error::Result,
    transport::{HttpMethod, RequestContext, Transport, TransportResponse, sealed},
};

/// One request seen by [`FakeTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of the `<PageNumber>` element, or 1 when absent.
    pub fn page(&self) -> u32 {
        self.body
            .split_once("<PageNumber>")
            .and_then(|(_, rest)| rest.split_once("</PageNumber>"))
            .and_then(|(number, _)| number.parse().ok())
            .unwrap_or(1)
    }
}

type Handler = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

/// Scripted transport.
#[derive(Clone)]
pub(crate) struct FakeTransport {
    handler: Arc<Handler>,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl sealed::private::Sealed for FakeTransport {}

impl FakeTransport {
    pub fn new(
        handler: impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    ) -> Self {
        Self { handler: Arc::new(handler), delay: Duration::ZERO, requests: Arc::default() }
    }

    /// Answers every request with the same status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        let body = body.to_owned();
        Self::new(move |_| (status, body.clone()))
    }

    /// Sleeps before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(
        &self,
        method: HttpMethod,
        ctx: RequestContext<'_>,
        body: &[u8],
    ) -> Result<TransportResponse> {
        let request = RecordedRequest {
            method: method.as_str(),
            url: ctx.url.to_owned(),
            headers: ctx.headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
            content_type: ctx.content_type.map(str::to_owned),
            body: String::from_utf8_lossy(body).into_owned(),
        };
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (status, reply) = (self.handler)(&request);
        Ok(TransportResponse { status, body: reply.into_bytes() })
    }
}

impl Transport for FakeTransport {
    async fn get<'a>(&'a self, ctx: RequestContext<'a>) -> Result<TransportResponse> {
        self.answer(HttpMethod::Get, ctx, &[]).await
    }

    async fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.answer(HttpMethod::Post, ctx, body).await
    }

    fn protocol_name(&self) -> &'static str {
        "fake"
    }
}

/// Sandbox client with `dev`/`app`/`cert`/`token` credentials over `transport`.
///
/// Returns a handle to the transport for request inspection.
pub(crate) fn test_client(transport: FakeTransport) -> (EbayClient<FakeTransport>, FakeTransport) {
    test_client_with_config(transport, ClientConfig::default())
}

pub(crate) fn test_client_with_config(
    transport: FakeTransport,
    config: ClientConfig,
) -> (EbayClient<FakeTransport>, FakeTransport) {
    let credentials = Credentials::new("dev", "app", "cert", "token");
    let client = EbayClient::with_transport(credentials, config, transport.clone());
    (client, transport)
}
