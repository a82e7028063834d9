//! Discord REST API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Bearer authentication per call (the caller's OAuth token)
//! - Status code mapping onto [`ProviderError`]
//!
//! Calls are single-shot. There is no retry middleware and no response cache.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::IdentityProvider;
use crate::config::{Config, api, endpoints};
use crate::error::{ProviderError, ProviderResult};
use crate::models::{DiscordAuthorization, DiscordGuild};
use crate::principal::Credential;

/// Discord API client.
#[derive(Clone)]
pub struct DiscordClient {
    /// HTTP client.
    client: Client,

    /// Base URL and timeouts the client was built with.
    config: Config,
}

impl DiscordClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self { client, config: config.clone() })
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.discord_api_url
    }

    /// Make an authenticated GET request and decode the JSON body.
    async fn get<T>(&self, path: &str, credential: &Credential) -> ProviderResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        tracing::debug!(
            method = "GET",
            path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Discord API call"
        );

        let response = Self::handle_response(response).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body).map_err(ProviderError::from)
    }

    fn transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.config.request_timeout)
        } else {
            ProviderError::Http(error)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::unauthorized(status.as_u16()))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<f64>().ok())
                    .unwrap_or(1.0);

                Err(ProviderError::rate_limited(retry_after))
            }
            s if s.is_server_error() => {
                let text = response.text().await.unwrap_or_default();
                Err(ProviderError::server(s.as_u16(), text))
            }
            s => {
                let text = response.text().await.unwrap_or_default();
                Err(ProviderError::UnexpectedStatus { status: s.as_u16(), message: text })
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for DiscordClient {
    async fn fetch_authorization(
        &self,
        credential: &Credential,
    ) -> ProviderResult<DiscordAuthorization> {
        self.get(endpoints::CURRENT_AUTHORIZATION, credential).await
    }

    async fn fetch_guilds(&self, credential: &Credential) -> ProviderResult<Vec<DiscordGuild>> {
        self.get(endpoints::CURRENT_USER_GUILDS, credential).await
    }
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient").field("base_url", &self.config.discord_api_url).finish()
    }
}
