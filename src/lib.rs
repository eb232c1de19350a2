//! Async client for the Getui v2 push-notification REST API.
//!
//! The [`Client`] authenticates with an app id / app key / master secret
//! triple, caches the resulting bearer token for its 23-hour useful
//! lifetime, and exposes typed facades for pushing notifications,
//! managing user aliases and tags, and querying delivery statistics.
//!
//! ```no_run
//! use pushgate::{Client, Config};
//! use pushgate::models::push::{Audience, Notification, PushMessage, PushRequest};
//!
//! # async fn run() -> pushgate::Result<()> {
//! let client = Client::new(Config::new("app-id", "app-key", "master-secret"))?;
//!
//! let request = PushRequest::new(
//!     Audience::Cids(vec!["target-cid".into()]),
//!     PushMessage::notification(Notification::new("Title", "Body", "url")),
//! );
//! let response = client.push().to_single_by_cid(request).await?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! Authentication is transparent: every facade call asks the
//! [`auth::TokenManager`] for a token first and re-authenticates only
//! when the cached one has lapsed. Remote rejections surface as
//! [`Error::Api`] with the authority's code and message verbatim;
//! transport and decode failures surface as [`Error::Network`] and
//! [`Error::MalformedResponse`].

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::TokenManager;
pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use models::ApiResponse;
