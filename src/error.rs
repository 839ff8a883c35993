use serde_json::{json, Value};
use thiserror::Error;

/// Result type for readlist operations
pub type Result<T> = std::result::Result<T, ReadlistError>;

#[derive(Debug, Error)]
pub enum ReadlistError {
    /// Client-supplied entry is missing required fields. Every missing
    /// field is listed, not only the first one found.
    #[error("Missing required fields: {}", .missing_fields.join(", "))]
    Validation { missing_fields: Vec<String> },

    /// The catalog answered with something other than 200.
    #[error("unexpected response code: {status} (url attempted: {url})")]
    Upstream { status: u16, url: String },

    /// The request to the catalog never produced a response.
    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The catalog response body is not the expected JSON envelope.
    #[error("failed to parse JSON from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("readlist entry {id} not found")]
    NotFound { id: i64 },
}

impl ReadlistError {
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            missing_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn decode(url: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status a handler should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Upstream { .. }
            | Self::Transport { .. }
            | Self::Decode { .. }
            | Self::Store(_) => 500,
        }
    }

    /// Structured body reported to clients in place of a stack trace.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Validation { missing_fields } => json!({
                "error": "Missing required fields",
                "missing_fields": missing_fields,
            }),
            Self::Upstream { status, url } => json!({
                "error": "could not fetch from catalog",
                "status": status,
                "url": url,
            }),
            Self::NotFound { id } => json!({
                "error": "readlist entry not found",
                "id": id,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}
