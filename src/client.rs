//! The top-level API client.
//!
//! A `Client` owns one HTTP connection pool and one [`TokenManager`];
//! every facade request obtains a token from the manager and attaches
//! it as the `token` header. Clone is cheap - the pool and the token
//! cache are shared behind `Arc`.

use std::sync::Arc;

use chrono::Utc;
use reqwest::{header, Method};
use serde::Serialize;
use tracing::debug;

use crate::api::{PushApi, StatsApi, UserApi};
use crate::auth::{TokenManager, JSON_CONTENT_TYPE};
use crate::config::Config;
use crate::error::Result;
use crate::models::ApiResponse;

/// Request header carrying the bearer token.
const TOKEN_HEADER: &str = "token";

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<Config>,
    tokens: Arc<TokenManager>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Validate the configuration and build a client. The token cache
    /// starts empty; the first request authenticates on demand.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let tokens = Arc::new(TokenManager::new(Arc::clone(&config), http.clone()));

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Build a client from `PUSHGATE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// The token lifecycle manager backing this client.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Push delivery operations.
    pub fn push(&self) -> PushApi<'_> {
        PushApi::new(self)
    }

    /// User, alias, and tag management operations.
    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Delivery statistics queries.
    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    /// Send an authorized request with a JSON body.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let request = self
            .http
            .request(method, self.endpoint(path))
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(body);
        self.execute(path, request).await
    }

    /// Send an authorized request without a body.
    pub(crate) async fn send(&self, method: Method, path: &str) -> Result<ApiResponse> {
        let request = self
            .http
            .request(method, self.endpoint(path))
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        self.execute(path, request).await
    }

    async fn execute(&self, path: &str, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        // Any token error is fatal to this request and propagates unchanged
        let token = self.tokens.token().await?;

        debug!(path, "dispatching API request");
        let response = request.header(TOKEN_HEADER, token).send().await?;

        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.app_id,
            path
        )
    }

    /// Generate a request id for pushes that did not supply one:
    /// microseconds since epoch, always inside the API's 10-32 char bound.
    pub(crate) fn generate_request_id(&self) -> String {
        Utc::now().timestamp_micros().to_string()
    }
}
