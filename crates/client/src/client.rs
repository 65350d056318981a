use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, USER_AGENT,
};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::response::Response;
use crate::transport::{
    BlockingTransport, RawRequest, RawResponse, ReqwestBlockingTransport, ReqwestTransport,
    Transport,
};
use crate::{ClientConfig, ClientError};

/// Handle for calling the API, cheap to clone and safe to share.
///
/// Both call forms go through the same configuration: [`Client::execute`]
/// for async code and [`Client::execute_blocking`] for synchronous code.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    blocking: Arc<dyn BlockingTransport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds a client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config)?;
        let blocking = ReqwestBlockingTransport::new(&config);
        Ok(Self::with_transport(config, Arc::new(transport), Arc::new(blocking)))
    }

    /// Builds a client over caller-supplied transports.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        blocking: Arc<dyn BlockingTransport>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            blocking,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `endpoint` and wraps the reply.
    pub async fn execute<T>(&self, endpoint: Endpoint<T>) -> Result<Response<T>, ClientError> {
        let request = self.prepare(&endpoint)?;
        let raw = self.transport.send(request).await?;
        self.finish(&endpoint, raw)
    }

    /// Blocking form of [`Client::execute`]. Must not be called from inside
    /// an async runtime.
    pub fn execute_blocking<T>(&self, endpoint: Endpoint<T>) -> Result<Response<T>, ClientError> {
        let request = self.prepare(&endpoint)?;
        let raw = self.blocking.send(request)?;
        self.finish(&endpoint, raw)
    }

    fn prepare<T>(&self, endpoint: &Endpoint<T>) -> Result<RawRequest, ClientError> {
        let url = endpoint.url(self.config.base_url())?;
        let headers = self.headers(endpoint.body().is_some())?;
        debug!(method = %endpoint.method(), %url, "sending request");
        Ok(RawRequest {
            method: endpoint.method().clone(),
            url,
            headers,
            body: endpoint.body().map(Bytes::copy_from_slice),
            timeout: self.config.timeout(),
        })
    }

    fn finish<T>(&self, endpoint: &Endpoint<T>, raw: RawResponse) -> Result<Response<T>, ClientError> {
        debug!(
            template = endpoint.template(),
            status = raw.status.as_u16(),
            bytes = raw.content.len(),
            "received response"
        );
        let decoder = endpoint.decoder_for(raw.status);
        Response::new(raw, decoder, self.config.unexpected_status_policy())
    }

    fn headers(&self, has_body: bool) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user-agent", self.config.user_agent())?);
        if let Some(token) = self.config.token() {
            headers.insert(AUTHORIZATION, header_value("authorization", &format!("Bearer {token}"))?);
        }
        if !self.config.cookies().is_empty() {
            let cookie = self
                .config
                .cookies()
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.insert(COOKIE, header_value("cookie", &cookie)?);
        }
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in self.config.headers() {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader { name: name.clone() })?;
            headers.insert(header, header_value(name, value)?);
        }
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Records the last request and answers with a canned response.
    struct Canned {
        status: StatusCode,
        body: &'static str,
        seen: Mutex<Option<RawRequest>>,
    }

    impl Canned {
        fn new(status: StatusCode, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(None),
            })
        }

        fn reply(&self, request: RawRequest) -> RawResponse {
            *self.seen.lock().unwrap() = Some(request);
            RawResponse {
                status: self.status,
                headers: HeaderMap::new(),
                content: Bytes::from_static(self.body.as_bytes()),
            }
        }

        fn seen(&self) -> RawRequest {
            self.seen.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError> {
            Ok(self.reply(request))
        }
    }

    impl BlockingTransport for Canned {
        fn send(&self, request: RawRequest) -> Result<RawResponse, ClientError> {
            Ok(self.reply(request))
        }
    }

    fn client(config: ClientConfig, canned: &Arc<Canned>) -> Client {
        Client::with_transport(config, canned.clone(), canned.clone())
    }

    fn config() -> ClientConfig {
        ClientConfig::parse("http://wm.test/api").unwrap()
    }

    #[tokio::test]
    async fn credentials_and_custom_headers_are_attached() {
        let canned = Canned::new(StatusCode::OK, "{}");
        let config = config()
            .with_token("tok")
            .with_cookie("a", "1")
            .with_cookie("b", "2")
            .with_header("x-trace", "abc")
            .with_user_agent("tests");
        let endpoint = Endpoint::<serde_json::Value>::post("/w/{workspace}/flows/create")
            .path_param("workspace", "demo")
            .json_body(&serde_json::json!({}))
            .unwrap()
            .expect_json(StatusCode::OK);

        client(config, &canned).execute(endpoint).await.unwrap();

        let seen = canned.seen();
        assert_eq!(seen.url.as_str(), "http://wm.test/api/w/demo/flows/create");
        assert_eq!(seen.headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(seen.headers[COOKIE], "a=1; b=2");
        assert_eq!(seen.headers[USER_AGENT], "tests");
        assert_eq!(seen.headers[CONTENT_TYPE], "application/json");
        assert_eq!(seen.headers["x-trace"], "abc");
        assert_eq!(seen.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn anonymous_get_sends_no_credentials_or_content_type() {
        let canned = Canned::new(StatusCode::OK, "1");
        let endpoint = Endpoint::<u32>::get("/version").expect_json(StatusCode::OK);

        let response = client(config(), &canned).execute_blocking(endpoint).unwrap();

        assert_eq!(response.parsed().unwrap(), Some(1));
        let seen = canned.seen();
        assert!(!seen.headers.contains_key(AUTHORIZATION));
        assert!(!seen.headers.contains_key(CONTENT_TYPE));
        assert!(seen.body.is_none());
        assert_eq!(seen.timeout, None);
    }

    #[test]
    fn configured_timeout_is_passed_through() {
        let canned = Canned::new(StatusCode::OK, "");
        let config = config().with_timeout(std::time::Duration::from_secs(7));
        let endpoint = Endpoint::<()>::get("/version").expect_empty(StatusCode::OK);
        client(config, &canned).execute_blocking(endpoint).unwrap();
        assert_eq!(canned.seen().timeout, Some(std::time::Duration::from_secs(7)));
    }

    #[test]
    fn raise_policy_comes_from_config() {
        let canned = Canned::new(StatusCode::NOT_FOUND, "missing");
        let endpoint = || Endpoint::<u32>::get("/version").expect_json(StatusCode::OK);

        let lenient = client(config(), &canned);
        let response = lenient.execute_blocking(endpoint()).unwrap();
        assert_eq!(response.parsed().unwrap(), None);

        let strict = client(config().with_raise_on_unexpected_status(true), &canned);
        let err = strict.execute_blocking(endpoint()).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn invalid_header_value_is_reported_before_sending() {
        let canned = Canned::new(StatusCode::OK, "");
        let config = config().with_header("x-bad", "line\nbreak");
        let endpoint = Endpoint::<()>::get("/version").expect_empty(StatusCode::OK);
        let err = client(config, &canned).execute_blocking(endpoint).unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader { ref name } if name == "x-bad"));
        assert!(canned.seen.lock().unwrap().is_none());
    }
}
