//! Error taxonomy of the HTTP client.
//!
//! Every failure surfaces on the call that triggered it. The client makes a
//! single attempt per call and never retries.

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building, sending or decoding a call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a status the endpoint does not document and
    /// the client is configured to raise on it.
    #[error("unexpected status code: {status}\n\nresponse content:\n{}", String::from_utf8_lossy(.content))]
    UnexpectedStatus {
        status: StatusCode,
        /// Raw response body, unmodified.
        content: Bytes,
    },

    /// Connection, TLS or timeout failure, passed through from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A documented response body did not match its declared model.
    #[error("failed to decode {status} response body")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// A `{placeholder}` of the URL template was never bound.
    #[error("path parameter `{name}` of `{template}` is not bound")]
    MissingPathParam { template: &'static str, name: String },

    /// A path parameter contains a `.` or `..` segment, which would move
    /// the request to another route.
    #[error("path parameter `{name}` has a dot segment: `{value}`")]
    InvalidPathParam { name: String, value: String },

    /// The configured base URL cannot have path segments appended.
    #[error("base url `{0}` cannot be used as an API root")]
    InvalidBaseUrl(String),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::UnexpectedStatus { status, .. } | ClientError::Decode { status, .. } => {
                Some(*status)
            }
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Raw body of an unexpected-status response.
    pub fn content(&self) -> Option<&Bytes> {
        match self {
            ClientError::UnexpectedStatus { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Returns `true` for request timeouts reported by the transport.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }
}
