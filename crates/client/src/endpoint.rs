//! Endpoint descriptors.
//!
//! An [`Endpoint<T>`] is the static shape of one API call bound to concrete
//! arguments: verb, URL template, path and query parameters, an optional
//! JSON body, and a decoder for each documented response status. It is
//! built fresh for every call and consumed by
//! [`Client::execute`](crate::Client::execute).

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::ClientError;

/// Decodes the body of a documented response.
pub type Decoder<T> = fn(&[u8]) -> Result<T, serde_json::Error>;

/// One API call, ready to be rendered into a request.
#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    method: Method,
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
    responses: Vec<(StatusCode, Decoder<T>)>,
}

impl<T> Endpoint<T> {
    /// Starts a descriptor for `template`, e.g. `/w/{workspace}/flows/get/{path}`.
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
            responses: Vec::new(),
        }
    }

    pub fn get(template: &'static str) -> Self {
        Self::new(Method::GET, template)
    }

    pub fn post(template: &'static str) -> Self {
        Self::new(Method::POST, template)
    }

    pub fn delete(template: &'static str) -> Self {
        Self::new(Method::DELETE, template)
    }

    /// Binds the `{name}` placeholder. A value containing `/` expands into
    /// several path segments; `.` and `..` segments are refused when the URL
    /// is rendered.
    pub fn path_param(mut self, name: &'static str, value: impl std::fmt::Display) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn query(mut self, key: &'static str, value: impl std::fmt::Display) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Adds a query pair only when `value` is `Some`.
    pub fn query_opt(self, key: &'static str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Encodes `body` as the JSON request payload.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_vec(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    /// Documents `status`, decoding its body with `decoder`.
    pub fn respond(mut self, status: StatusCode, decoder: Decoder<T>) -> Self {
        self.responses.push((status, decoder));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Decoder for `status`, or `None` if the endpoint does not document it.
    pub fn decoder_for(&self, status: StatusCode) -> Option<Decoder<T>> {
        self.responses
            .iter()
            .find(|(documented, _)| *documented == status)
            .map(|(_, decoder)| *decoder)
    }

    /// Renders the full request URL below `base`.
    pub fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl(base.to_string()))?;
            segments.pop_if_empty();
            for part in self.template.trim_start_matches('/').split('/') {
                match placeholder(part) {
                    Some(name) => {
                        let value = self
                            .path_params
                            .iter()
                            .find(|(bound, _)| *bound == name)
                            .map(|(_, value)| value)
                            .ok_or_else(|| ClientError::MissingPathParam {
                                template: self.template,
                                name: name.to_string(),
                            })?;
                        if value.split('/').any(|seg| seg == "." || seg == "..") {
                            return Err(ClientError::InvalidPathParam {
                                name: name.to_string(),
                                value: value.clone(),
                            });
                        }
                        segments.extend(value.split('/'));
                    }
                    None => {
                        segments.push(part);
                    }
                }
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

impl<T: DeserializeOwned> Endpoint<T> {
    /// Documents `status` with a JSON body decoded as `T`.
    pub fn expect_json(self, status: StatusCode) -> Self {
        self.respond(status, decode_json::<T>)
    }
}

impl Endpoint<String> {
    /// Documents `status` with a plain-text body.
    pub fn expect_text(self, status: StatusCode) -> Self {
        self.respond(status, decode_text)
    }
}

impl Endpoint<()> {
    /// Documents `status` with a body that is ignored.
    pub fn expect_empty(self, status: StatusCode) -> Self {
        self.respond(status, decode_empty)
    }
}

fn placeholder(part: &str) -> Option<&str> {
    part.strip_prefix('{')?.strip_suffix('}')
}

fn decode_json<T: DeserializeOwned>(content: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(content)
}

fn decode_text(content: &[u8]) -> Result<String, serde_json::Error> {
    Ok(String::from_utf8_lossy(content).into_owned())
}

fn decode_empty(_: &[u8]) -> Result<(), serde_json::Error> {
    Ok(())
}
