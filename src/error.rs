use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not complete the exchange.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The exchange completed but the payload did not match the
    /// expected shape. Network-class: a legitimate remote rejection is
    /// reported as [`Error::Api`] instead.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The authority's envelope reported a nonzero status code. The code
    /// and message are surfaced verbatim so callers can branch on them.
    #[error("API error: code={code}, message={message}")]
    Api { code: i64, message: String },

    #[error("invalid config: {0} is required")]
    Config(&'static str),

    #[error("request_id must be between 10-32 characters")]
    InvalidRequestId,

    #[error("cid cannot be empty")]
    EmptyCid,

    #[error("alias cannot be empty")]
    EmptyAlias,

    #[error("task_id cannot be empty")]
    EmptyTaskId,

    #[error("data_list cannot be empty")]
    EmptyBindingList,
}

impl Error {
    /// The remote status code, when this is an API rejection.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
