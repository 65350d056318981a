//! The response envelope.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::endpoint::Decoder;
use crate::transport::RawResponse;
use crate::ClientError;

/// What to do with a status the endpoint does not document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedStatusPolicy {
    /// Fail the call with [`ClientError::UnexpectedStatus`].
    Raise,
    /// Return the envelope with an absent payload.
    ReturnEmpty,
}

/// One completed call: status, headers and raw body, with the typed payload
/// decoded on access.
///
/// Decoding is deferred, so a malformed body only surfaces as
/// [`ClientError::Decode`] when [`Response::parsed`] is called. Undocumented
/// statuses never decode; their payload is always `None`.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: StatusCode,
    headers: HeaderMap,
    content: Bytes,
    decoder: Option<Decoder<T>>,
}

impl<T> Response<T> {
    /// Wraps `raw`, applying `policy` when `decoder` is `None` (the status
    /// is not documented).
    pub fn new(
        raw: RawResponse,
        decoder: Option<Decoder<T>>,
        policy: UnexpectedStatusPolicy,
    ) -> Result<Self, ClientError> {
        let RawResponse {
            status,
            headers,
            content,
        } = raw;
        if decoder.is_none() {
            tracing::warn!(status = status.as_u16(), bytes = content.len(), "undocumented response status");
            if policy == UnexpectedStatusPolicy::Raise {
                return Err(ClientError::UnexpectedStatus { status, content });
            }
        }
        Ok(Self {
            status,
            headers,
            content,
            decoder,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns `true` if the endpoint documents this status.
    pub fn is_documented(&self) -> bool {
        self.decoder.is_some()
    }

    /// Decodes the payload; `Ok(None)` for undocumented statuses.
    pub fn parsed(&self) -> Result<Option<T>, ClientError> {
        let Some(decode) = self.decoder else {
            return Ok(None);
        };
        decode(&self.content)
            .map(Some)
            .map_err(|source| ClientError::Decode {
                status: self.status,
                source,
            })
    }

    pub fn into_parsed(self) -> Result<Option<T>, ClientError> {
        self.parsed()
    }
}
