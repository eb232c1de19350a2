//! Push request payloads.
//!
//! These mirror the shapes the v2 REST API expects. Optional fields are
//! omitted from the serialized body entirely rather than sent as null.

use std::collections::HashMap;

use serde::ser::SerializeStruct as _;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Who a push is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every registered client of the application. Serializes as the
    /// literal string `"all"`.
    All,
    /// Explicit client ids.
    Cids(Vec<String>),
    /// Explicit aliases.
    Aliases(Vec<String>),
    /// Tag expressions.
    Tags(Vec<String>),
    /// A previously uploaded audience file.
    FileId(String),
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Audience::All => serializer.serialize_str("all"),
            Audience::Cids(cids) => {
                let mut state = serializer.serialize_struct("Audience", 1)?;
                state.serialize_field("cid", cids)?;
                state.end()
            }
            Audience::Aliases(aliases) => {
                let mut state = serializer.serialize_struct("Audience", 1)?;
                state.serialize_field("alias", aliases)?;
                state.end()
            }
            Audience::Tags(tags) => {
                let mut state = serializer.serialize_struct("Audience", 1)?;
                state.serialize_field("tag", tags)?;
                state.end()
            }
            Audience::FileId(file_id) => {
                let mut state = serializer.serialize_struct("Audience", 1)?;
                state.serialize_field("file_id", file_id)?;
                state.end()
            }
        }
    }
}

/// In-app notification content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub click_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buzz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_pkg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        click_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            click_type: click_type.into(),
            ..Self::default()
        }
    }
}

/// Revoke a previously delivered task.
#[derive(Debug, Clone, Serialize)]
pub struct Revoke {
    pub old_task_id: String,
}

/// The message portion of a push.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PushMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoke: Option<Revoke>,
}

impl PushMessage {
    pub fn notification(notification: Notification) -> Self {
        Self {
            notification: Some(notification),
            ..Self::default()
        }
    }

    pub fn transmission(payload: impl Into<String>) -> Self {
        Self {
            transmission: Some(payload.into()),
            ..Self::default()
        }
    }
}

/// iOS alert content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Alert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

/// APNs payload settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Apns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_available: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<HashMap<String, String>>,
}

/// iOS channel parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ios {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns: Option<Apns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns_collapse_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_available: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

/// Vendor-channel notification delivered through the unified push
/// service on Android.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpsNotification {
    pub title: String,
    pub body: String,
    pub click_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
}

/// Unified push service parameters for Android vendor channels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<UpsNotification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
}

/// Android channel parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Android {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ups: Option<Ups>,
}

/// HarmonyOS notification content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarmonyNotification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want: Option<String>,
}

/// HarmonyOS channel parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Harmony {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<HarmonyNotification>,
}

/// Vendor channel overrides for offline delivery.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PushChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<Ios>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<Android>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmony: Option<Harmony>,
}

/// Per-vendor delivery strategy selectors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Strategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vv: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm: Option<i32>,
}

/// Task-level delivery settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<String>,
}

/// `request_id` bounds enforced by the API.
const REQUEST_ID_MIN_LEN: usize = 10;
const REQUEST_ID_MAX_LEN: usize = 32;

/// A complete push request.
///
/// The audience and message are required by construction; everything
/// else is optional. A missing `request_id` is filled in by the client
/// right before dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct PushRequest {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    pub audience: Audience,
    pub push_message: PushMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_channel: Option<PushChannel>,
}

impl PushRequest {
    pub fn new(audience: Audience, push_message: PushMessage) -> Self {
        Self {
            request_id: String::new(),
            task_name: None,
            group_name: None,
            settings: None,
            audience,
            push_message,
            push_channel: None,
        }
    }

    /// Reject a caller-supplied `request_id` outside the 10-32 char
    /// bound. An empty id is fine; it is generated at dispatch.
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.request_id.is_empty()
            && (self.request_id.len() < REQUEST_ID_MIN_LEN
                || self.request_id.len() > REQUEST_ID_MAX_LEN)
        {
            return Err(Error::InvalidRequestId);
        }
        Ok(())
    }

    pub(crate) fn ensure_request_id(&mut self, generate: impl FnOnce() -> String) {
        if self.request_id.is_empty() {
            self.request_id = generate();
        }
    }
}

/// An audience-selection request without a message body, used by the
/// list-push endpoints after a message has been created.
#[derive(Debug, Clone, Serialize)]
pub struct AudienceRequest {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    pub audience: Audience,
}

impl AudienceRequest {
    pub fn new(audience: Audience) -> Self {
        Self {
            request_id: String::new(),
            task_name: None,
            group_name: None,
            settings: None,
            audience,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.request_id.is_empty()
            && (self.request_id.len() < REQUEST_ID_MIN_LEN
                || self.request_id.len() > REQUEST_ID_MAX_LEN)
        {
            return Err(Error::InvalidRequestId);
        }
        Ok(())
    }

    pub(crate) fn ensure_request_id(&mut self, generate: impl FnOnce() -> String) {
        if self.request_id.is_empty() {
            self.request_id = generate();
        }
    }
}

/// One alias-to-cid pair for the batch bind/unbind endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AliasBinding {
    pub cid: String,
    pub alias: String,
}
