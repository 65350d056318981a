//! HTTP client for the Windmill API.
//!
//! Implements the call side of the [`models`] domain: every operation is an
//! [`Endpoint`] descriptor rendered against a [`ClientConfig`], sent through
//! a [`Transport`] and wrapped in a [`Response`] envelope whose payload is
//! decoded lazily.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, header handling and status policy
//! live here. Payload shapes come from [`models`]; this crate adds no domain
//! rules of its own.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `ClientConfig` |
//! | [`endpoint`] | `Endpoint<T>` descriptor and URL rendering |
//! | [`transport`] | `Transport` / `BlockingTransport` seams and their `reqwest` implementations |
//! | [`response`] | `Response<T>` envelope and `UnexpectedStatusPolicy` |
//! | [`api`] | One module per API operation |

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod response;
pub mod transport;

mod client;

pub use client::Client;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use response::{Response, UnexpectedStatusPolicy};
pub use transport::{BlockingTransport, RawRequest, RawResponse, Transport};

pub use reqwest::header::HeaderMap;
pub use reqwest::{Method, StatusCode};
