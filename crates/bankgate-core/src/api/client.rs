//! HTTP client for the remote authority.
//!
//! `ApiClient` implements [`AuthGateway`] over the authority's two JSON
//! endpoints. Every request goes through a fallible helper that returns
//! [`ApiError`]; the public gateway methods fold those errors into a
//! negative answer and log them.

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{Config, LoginTransport};

use super::gateway::{AuthGateway, AuthReply, LoginResult};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Session verification endpoint
const CHECK_LOGIN_PATH: &str = "/api/check_login";

/// Credential exchange endpoint
const LOGIN_PATH: &str = "/api/login";

/// Marks requests as coming from the page script rather than a navigation
const REQUESTED_WITH: &str = "XMLHttpRequest";

/// API client for the remote authority.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    login_transport: LoginTransport,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base()?,
            login_transport: config.login_transport,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// GET carrying its parameters in the query string, headed the way the
    /// authority's own frontend sends it
    fn get(&self, url: Url) -> RequestBuilder {
        self.client
            .get(url)
            .header(header::CONTENT_TYPE, "application/json")
    }

    /// Send a request and parse the authority's reply body.
    async fn send(request: RequestBuilder) -> Result<AuthReply, ApiError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .header("X-Requested-With", REQUESTED_WITH)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Authority response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse reply: {}", e)))
    }

    async fn try_check_login(&self, token: Option<&str>) -> Result<AuthReply, ApiError> {
        let url = self.endpoint(CHECK_LOGIN_PATH)?;
        let request = self.get(url).query(&[("token", token.unwrap_or_default())]);
        Self::send(request).await
    }

    async fn try_login(&self, account: &str, password: &str) -> Result<AuthReply, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let params = [("account", account), ("password", password)];
        let request = match self.login_transport {
            LoginTransport::Query => self.get(url).query(&params),
            LoginTransport::FormBody => self.client.post(url).form(&params),
        };
        Self::send(request).await
    }
}

impl AuthGateway for ApiClient {
    async fn check_login(&self, token: Option<&str>) -> bool {
        match self.try_check_login(token).await {
            Ok(reply) => {
                let authenticated = reply.is_success();
                debug!(authenticated, message = ?reply.message, "Session checked");
                authenticated
            }
            Err(e) => {
                warn!(error = %e, "Session check failed, treating as unauthenticated");
                false
            }
        }
    }

    async fn login(&self, account: &str, password: &str) -> LoginResult {
        match self.try_login(account, password).await {
            Ok(reply) => {
                let message = reply.message.clone();
                let result = reply.into_login_result();
                if result.is_success() {
                    info!(account, "Login accepted");
                } else {
                    info!(account, message = ?message, "Login rejected");
                }
                result
            }
            Err(e) => {
                warn!(error = %e, account, "Login request failed");
                LoginResult::Failure
            }
        }
    }
}
