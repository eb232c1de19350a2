//! Token lifecycle management for the Getui authentication endpoint.
//!
//! Every authorized API call needs a bearer token issued by
//! `POST {base_url}/{app_id}/auth`. Tokens are valid for 24 hours; the
//! manager caches the current one and re-authenticates transparently
//! once it lapses.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::ApiResponse;

/// Cached token lifetime in hours.
/// The authority issues 24-hour tokens; the 1-hour margin absorbs clock
/// skew and in-flight request latency so a cached token is never sent
/// past its true expiry.
const TOKEN_TTL_HOURS: i64 = 23;

/// Content type expected by the authority.
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Compute the request signature: lowercase-hex SHA-256 over the
/// concatenation of app key, millisecond timestamp, and master secret.
///
/// This is the only place the master secret is read, and neither the
/// secret nor the digest input is ever logged.
pub fn sign(app_key: &str, timestamp: &str, master_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(app_key.as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(master_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Wall-clock source, injectable so expiry boundaries can be tested
/// without real time passing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Default clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A bearer token together with the instant it stops being usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    fn is_usable(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Serialize)]
struct AuthRequest {
    sign: String,
    timestamp: String,
    appkey: String,
}

#[derive(Deserialize)]
struct AuthData {
    token: String,
}

/// Obtains, caches, and renews the bearer token used to authorize
/// API requests.
///
/// The credential sits behind an `RwLock`, so concurrent callers never
/// observe a token paired with a stale expiry. The lock is not held
/// across the network round-trip: callers that observe an expired
/// credential at the same moment each authenticate independently and
/// the last successful write wins. A caller never fails merely because
/// it raced another caller's successful authentication.
pub struct TokenManager {
    config: Arc<Config>,
    http: reqwest::Client,
    credential: RwLock<Option<Credential>>,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    /// Create a manager that starts with no credential.
    pub fn new(config: Arc<Config>, http: reqwest::Client) -> Self {
        Self::with_clock(config, http, Arc::new(SystemClock))
    }

    /// Create a manager with an explicit clock.
    pub fn with_clock(config: Arc<Config>, http: reqwest::Client, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            http,
            credential: RwLock::new(None),
            clock,
        }
    }

    /// Return a currently-valid bearer token, authenticating against the
    /// authority only when the cached credential is absent or expired.
    ///
    /// Errors are never retried here and never downgraded to a stale
    /// token: transport and decode failures surface as [`Error::Network`]
    /// or [`Error::MalformedResponse`], and a nonzero envelope code
    /// surfaces as [`Error::Api`] with the remote code and message
    /// verbatim.
    pub async fn token(&self) -> Result<String> {
        {
            let guard = self.credential.read().expect("credential lock poisoned");
            if let Some(credential) = guard.as_ref() {
                if credential.is_usable(self.clock.now()) {
                    debug!("token cache hit");
                    return Ok(credential.token.clone());
                }
            }
        }

        debug!("token cache miss, authenticating");
        self.authenticate().await
    }

    /// Run the authentication protocol and replace the cached credential.
    /// The cached state is only touched after the exchange has fully
    /// succeeded, so a failure leaves the previous credential intact.
    async fn authenticate(&self) -> Result<String> {
        let timestamp = self.clock.now().timestamp_millis().to_string();
        let request = AuthRequest {
            sign: sign(
                &self.config.app_key,
                &timestamp,
                &self.config.master_secret,
            ),
            timestamp,
            appkey: self.config.app_key.clone(),
        };

        let url = format!(
            "{}/{}/auth",
            self.config.base_url.trim_end_matches('/'),
            self.config.app_id
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&request)
            .send()
            .await?;

        let envelope: ApiResponse = response.json().await?;
        if !envelope.is_success() {
            warn!(code = envelope.code, msg = %envelope.msg, "authentication rejected");
            return Err(Error::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }

        let data: AuthData = envelope.data_as()?;
        let expires_at = self.clock.now() + Duration::hours(TOKEN_TTL_HOURS);

        let mut guard = self.credential.write().expect("credential lock poisoned");
        *guard = Some(Credential {
            token: data.token.clone(),
            expires_at,
        });

        Ok(data.token)
    }

    /// Directly install a credential, bypassing the network protocol.
    /// Intended for tests exercising expiry boundaries.
    pub fn set_credential(&self, token: impl Into<String>, expires_at: DateTime<Utc>) {
        let mut guard = self.credential.write().expect("credential lock poisoned");
        *guard = Some(Credential {
            token: token.into(),
            expires_at,
        });
    }

    /// Drop the cached credential; the next [`token`](Self::token) call
    /// re-authenticates.
    pub fn clear(&self) {
        let mut guard = self.credential.write().expect("credential lock poisoned");
        *guard = None;
    }

    /// The cached token, if any, without checking expiry.
    pub fn current_token(&self) -> Option<String> {
        let guard = self.credential.read().expect("credential lock poisoned");
        guard.as_ref().map(|c| c.token.clone())
    }

    /// Expiry of the cached credential, if one is held.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let guard = self.credential.read().expect("credential lock poisoned");
        guard.as_ref().map(|c| c.expires_at)
    }

    /// Whether the manager currently holds no usable credential.
    pub fn is_expired(&self) -> bool {
        let guard = self.credential.read().expect("credential lock poisoned");
        match guard.as_ref() {
            Some(credential) => !credential.is_usable(self.clock.now()),
            None => true,
        }
    }
}
