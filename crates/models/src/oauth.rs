use serde::{Deserialize, Serialize};

use crate::{impl_model, AdditionalProperties, Maybe};

/// Authorization code handed back by the OAuth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectCallbackBody {
    pub code: String,
    pub state: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ConnectCallbackBody { "code", "state" });

impl ConnectCallbackBody {
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: state.into(),
            additional_properties: AdditionalProperties::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime of `access_token` in seconds.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub expires_in: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub refresh_token: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub scope: Maybe<Vec<String>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(TokenResponse { "access_token", "expires_in", "refresh_token", "scope" });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::assert_declared_fields;
    use crate::Model;
    use serde_json::json;

    #[test]
    fn provider_specific_keys_are_preserved() {
        let raw = json!({ "access_token": "gho_x", "token_type": "bearer", "scope": ["repo"] });
        let token = TokenResponse::from_value(raw.clone()).unwrap();
        assert_eq!(token.additional_keys(), vec!["token_type"]);
        assert_eq!(token.to_value().unwrap(), raw);
    }

    #[test]
    fn declared_fields_are_complete() {
        assert_declared_fields(&ConnectCallbackBody::new("abc", "xyz"));
        assert_declared_fields(
            &TokenResponse::from_value(json!({
                "access_token": "t",
                "expires_in": 3600,
                "refresh_token": "r",
                "scope": []
            }))
            .unwrap(),
        );
    }
}
