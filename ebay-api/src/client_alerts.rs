//! Client Alerts session flow.
//!
//! Polling alerts takes three steps:
//!
//! 1. [`ClientAlertsApi::get_client_alerts_auth_token`] (Trading, XML)
//!    obtains a Client Alerts token.
//! 2. [`ClientAlertsApi::login`] (REST) trades the token for a session ID
//!    and session data.
//! 3. [`ClientAlertsApi::get_user_alerts`] (REST) polls; every successful
//!    reply carries fresh session data for the next poll.
//!
//! REST replies are returned even when their `Ack` is `Failure`. Stored
//! state only changes on successful replies.
//!
//! ```rust,no_run
//! use ebay_api::{ClientAlertsApi, Credentials, EbayClient};
//!
//! # async fn example() -> ebay_api::error::Result<()> {
//! let client = EbayClient::sandbox(Credentials::from_env()?)?;
//! let mut alerts = ClientAlertsApi::new(client);
//!
//! alerts.get_client_alerts_auth_token().await?;
//! alerts.login().await?;
//! let polled = alerts.get_user_alerts().await?;
//! for event in &polled.client_alerts.client_alert_event {
//!     println!("{}", event.event_type);
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, instrument, warn};

use crate::{
    call::Response,
    calls::{
        GetClientAlertsAuthTokenRequest, GetClientAlertsAuthTokenResponse, GetUserAlertsRequest,
        GetUserAlertsResponse, LoginRequest, LoginResponse,
    },
    client::EbayClient,
    error::Result,
    transport::{HttpMethod, HttpTransport, Transport},
};

/// Client Alerts session holder.
pub struct ClientAlertsApi<T: Transport = HttpTransport> {
    client: EbayClient<T>,
    endpoint: String,
    auth_token: String,
    session_id: String,
    session_data: String,
}

impl<T: Transport> std::fmt::Debug for ClientAlertsApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAlertsApi")
            .field("endpoint", &self.endpoint)
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ClientAlertsApi<T> {
    /// Session holder using the client's configured Client Alerts endpoint.
    #[must_use]
    pub fn new(client: EbayClient<T>) -> Self {
        let endpoint = client.config().client_alerts_url.clone();
        Self::with_endpoint(client, endpoint)
    }

    /// Session holder for an explicit endpoint.
    #[must_use]
    pub fn with_endpoint(client: EbayClient<T>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            auth_token: String::new(),
            session_id: String::new(),
            session_data: String::new(),
        }
    }

    /// REST endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Stored Client Alerts token, empty before the first fetch.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Stored session ID.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Stored session data.
    #[must_use]
    pub fn session_data(&self) -> &str {
        &self.session_data
    }

    /// `true` once a login succeeded.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Uses a token obtained elsewhere instead of fetching one.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = token.into();
    }

    /// Fetches a Client Alerts token over the Trading API and stores it.
    pub async fn get_client_alerts_auth_token(
        &mut self,
    ) -> Result<GetClientAlertsAuthTokenResponse> {
        let response = self.client.execute(&GetClientAlertsAuthTokenRequest::default()).await?;
        self.auth_token.clone_from(&response.client_alerts_auth_token);
        debug!(expires = ?response.hard_expiration_time, "stored client alerts token");
        Ok(response)
    }

    /// Opens a session with the stored token.
    #[instrument(skip_all)]
    pub async fn login(&mut self) -> Result<LoginResponse> {
        let request = LoginRequest { client_alerts_auth_token: self.auth_token.clone() };
        let response = self.client.execute_rest(&self.endpoint, HttpMethod::Get, &request).await?;

        if response.failed() {
            warn!(errors = %response.errors(), "login failed");
        } else {
            self.session_id.clone_from(&response.session_id);
            self.session_data.clone_from(&response.session_data);
        }

        Ok(response)
    }

    /// Polls alerts for the stored session.
    #[instrument(skip_all)]
    pub async fn get_user_alerts(&mut self) -> Result<GetUserAlertsResponse> {
        let request = GetUserAlertsRequest {
            session_id: self.session_id.clone(),
            session_data: self.session_data.clone(),
        };
        let response = self.client.execute_rest(&self.endpoint, HttpMethod::Get, &request).await?;

        if response.failed() {
            warn!(errors = %response.errors(), "alert poll failed");
        } else {
            self.session_data.clone_from(&response.session_data);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, test_client};

    const ENDPOINT: &str = "http://alerts.example.com/ClientAlerts";

    fn alerts(transport: FakeTransport) -> (ClientAlertsApi<FakeTransport>, FakeTransport) {
        let (client, transport) = test_client(transport);
        (ClientAlertsApi::with_endpoint(client, ENDPOINT), transport)
    }

    fn session_flow(request: &crate::testing::RecordedRequest) -> (u16, String) {
        if request.method == "POST" {
            return (
                200,
                "<GetClientAlertsAuthTokenResponse><Ack>Success</Ack>\
                 <ClientAlertsAuthToken>alerts-token</ClientAlertsAuthToken>\
                 </GetClientAlertsAuthTokenResponse>"
                    .to_owned(),
            );
        }
        if request.url.contains("callname=Login") {
            return (200, r#"{"Ack":"Success","SessionID":"S1","SessionData":"D1"}"#.to_owned());
        }
        let alerts = r#"{"Ack":"Success",
            "ClientAlerts":{"ClientAlertEvent":[{"EventType":"EndOfAuction"}]},
            "SessionData":"D2"}"#;
        (200, alerts.to_owned())
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let (client, _) = test_client(FakeTransport::replying(200, ""));
        let api = ClientAlertsApi::new(client);
        assert_eq!(api.endpoint(), crate::config::DEFAULT_CLIENT_ALERTS_URL);
        assert!(!api.is_logged_in());
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let (mut api, transport) = alerts(FakeTransport::new(session_flow));

        api.get_client_alerts_auth_token().await.unwrap();
        assert_eq!(api.auth_token(), "alerts-token");

        api.login().await.unwrap();
        assert_eq!(api.session_id(), "S1");
        assert_eq!(api.session_data(), "D1");

        let polled = api.get_user_alerts().await.unwrap();
        assert_eq!(polled.client_alerts.client_alert_event[0].event_type, "EndOfAuction");
        assert_eq!(api.session_data(), "D2");

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].header("X-EBAY-API-CALL-NAME"), Some("GetClientAlertsAuthToken"));
        assert_eq!(
            requests[1].url,
            "http://alerts.example.com/ClientAlerts?version=957&appid=app&callname=Login\
             &ClientAlertsAuthToken=alerts-token"
        );
        assert_eq!(
            requests[2].url,
            "http://alerts.example.com/ClientAlerts?callname=GetUserAlerts\
             &SessionID=S1&SessionData=D1"
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_state() {
        let (mut api, _) = alerts(FakeTransport::replying(
            200,
            r#"{"Ack":"Failure","SessionID":"ignored",
                "Errors":[{"ShortMessage":"Bad token","ErrorCode":"931"}]}"#,
        ));
        api.set_auth_token("stale");

        let response = api.login().await.unwrap();
        assert!(response.failed());
        assert_eq!(response.errors().records()[0].error_code, 931);
        assert!(!api.is_logged_in());
        assert_eq!(api.session_data(), "");
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_session_data() {
        let (mut api, transport) = alerts(FakeTransport::new(|request| {
            if request.url.contains("callname=Login") {
                (200, r#"{"Ack":"Success","SessionID":"S1","SessionData":"D1"}"#.to_owned())
            } else {
                (500, r#"{"Ack":"Failure","SessionData":"bogus"}"#.to_owned())
            }
        }));

        api.login().await.unwrap();
        let polled = api.get_user_alerts().await.unwrap();

        assert!(polled.failed());
        assert_eq!(api.session_data(), "D1");
        assert_eq!(transport.requests().len(), 2);
    }
}
