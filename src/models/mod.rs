//! Wire types for the REST API.
//!
//! Every endpoint answers with the same `{code, msg, data}` envelope;
//! the request and response payload shapes live in the submodules.

pub mod push;
pub mod report;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The response envelope shared by every endpoint.
/// `code == 0` denotes success; any other value is a remote rejection
/// with a human-readable `msg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Decode the `data` field into a concrete payload type. A missing
    /// or mismatched payload is a malformed response, not an API error.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.data.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}
