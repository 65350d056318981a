//! Transport seam between the client and the HTTP stack.
//!
//! [`Client`](crate::Client) renders every call into a [`RawRequest`] and
//! hands it to a [`Transport`] (suspending form) or a [`BlockingTransport`]
//! (blocking form). The default implementations are backed by `reqwest`;
//! tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::OnceCell;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::{ClientConfig, ClientError};

/// A fully rendered HTTP request.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Deadline for the whole exchange, passed to the transport unchanged.
    pub timeout: Option<Duration>,
}

/// A completed HTTP exchange, body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content: Bytes,
}

/// Sends requests from async code.
///
/// Implementations must tolerate concurrent calls; the client adds no
/// locking or sequencing of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError>;
}

/// Sends requests from synchronous code.
pub trait BlockingTransport: Send + Sync {
    fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError>;
}

/// Async transport over a shared `reqwest::Client` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes().await?;
        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }
}

/// Blocking transport over `reqwest::blocking`.
///
/// The blocking client owns an internal runtime and must not be created
/// from inside an async context, so it is built on first use rather than
/// alongside the async one.
#[derive(Debug)]
pub struct ReqwestBlockingTransport {
    verify_ssl: bool,
    http: OnceCell<reqwest::blocking::Client>,
}

impl ReqwestBlockingTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            verify_ssl: config.verify_ssl(),
            http: OnceCell::new(),
        }
    }

    fn http(&self) -> Result<&reqwest::blocking::Client, ClientError> {
        self.http
            .get_or_try_init(|| {
                reqwest::blocking::Client::builder()
                    .danger_accept_invalid_certs(!self.verify_ssl)
                    .build()
            })
            .map_err(ClientError::from)
    }
}

impl BlockingTransport for ReqwestBlockingTransport {
    fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError> {
        let mut builder = self
            .http()?
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes()?;
        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }
}
