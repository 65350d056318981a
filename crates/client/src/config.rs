//! Client configuration.
//!
//! A [`ClientConfig`] can be built in code with the `with_*` setters or
//! deserialized from a TOML table:
//!
//! ```toml
//! base_url = "https://app.windmill.dev/api"
//! token = "..."
//! workspace = "demo"
//! timeout = 30
//! raise_on_unexpected_status = true
//!
//! [headers]
//! X-Request-Source = "cron"
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use models::WorkspaceId;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::response::UnexpectedStatusPolicy;
use crate::ClientError;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("wmill-rs/", env!("CARGO_PKG_VERSION"));

fn default_true() -> bool {
    true
}

fn timeout_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

/// Connection settings shared by every call made through a
/// [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API root; endpoint paths are appended to it.
    base_url: Url,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    cookies: BTreeMap<String, String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    /// Per-request timeout, read from TOML as whole seconds; `None` leaves
    /// it to the transport.
    #[serde(default, deserialize_with = "timeout_secs")]
    timeout: Option<Duration>,
    #[serde(default = "default_true")]
    verify_ssl: bool,
    #[serde(default)]
    raise_on_unexpected_status: bool,
    #[serde(default)]
    user_agent: Option<String>,
    /// Workspace used when a command does not name one.
    #[serde(default)]
    workspace: Option<WorkspaceId>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            cookies: BTreeMap::new(),
            headers: BTreeMap::new(),
            timeout: None,
            verify_ssl: true,
            raise_on_unexpected_status: false,
            user_agent: None,
            workspace: None,
        }
    }

    /// Parses `base_url` and builds a default configuration around it.
    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    pub fn with_raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn workspace(&self) -> Option<&WorkspaceId> {
        self.workspace.as_ref()
    }

    /// How undocumented response statuses are handled.
    pub fn unexpected_status_policy(&self) -> UnexpectedStatusPolicy {
        if self.raise_on_unexpected_status {
            UnexpectedStatusPolicy::Raise
        } else {
            UnexpectedStatusPolicy::ReturnEmpty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults_match_builder_defaults() {
        let from_toml: ClientConfig = toml::from_str(r#"base_url = "http://localhost:8000/api""#).unwrap();
        let built = ClientConfig::parse("http://localhost:8000/api").unwrap();
        assert_eq!(from_toml, built);
        assert!(from_toml.verify_ssl());
        assert_eq!(
            from_toml.unexpected_status_policy(),
            UnexpectedStatusPolicy::ReturnEmpty
        );
        assert_eq!(from_toml.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn full_toml_table_is_read() {
        let config: ClientConfig = toml::from_str(
            r#"
            base_url = "https://wm.example.com/api"
            token = "tok"
            timeout = 30
            verify_ssl = false
            raise_on_unexpected_status = true
            user_agent = "nightly-sync"
            workspace = "demo"

            [cookies]
            token = "c"

            [headers]
            X-Trace = "1"
            "#,
        )
        .unwrap();
        assert_eq!(config.token(), Some("tok"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(!config.verify_ssl());
        assert_eq!(config.unexpected_status_policy(), UnexpectedStatusPolicy::Raise);
        assert_eq!(config.workspace().map(WorkspaceId::as_str), Some("demo"));
        assert_eq!(config.cookies().get("token").map(String::as_str), Some("c"));
        assert_eq!(config.headers().len(), 1);
    }

    #[test]
    fn sub_second_timeout_is_kept() {
        let config = ClientConfig::parse("http://localhost:8000/api")
            .unwrap()
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn empty_workspace_is_rejected() {
        let err = toml::from_str::<ClientConfig>(
            r#"
            base_url = "http://localhost:8000/api"
            workspace = ""
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("WorkspaceId must not be empty"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<ClientConfig>(
            r#"
            base_url = "http://localhost/api"
            raise_on_unexpected = true
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("raise_on_unexpected"));
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(matches!(
            ClientConfig::parse("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
