//! Variable models.
//!
//! Secret values are only returned decrypted by the single-variable
//! endpoints; listings carry `value` unset or null for secrets.

use serde::{Deserialize, Serialize};

use crate::{impl_model, AdditionalProperties, ExtraPerms, Maybe, Timestamp};

/// A variable as returned by the listing and get endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListableVariable {
    pub workspace_id: String,
    pub path: String,
    pub is_secret: bool,
    pub extra_perms: ExtraPerms,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub value: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    /// Id of the linked OAuth account, for OAuth tokens.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub account: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_oauth: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_expired: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub refresh_error: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_linked: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_refreshed: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub expires_at: Maybe<Timestamp>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ListableVariable {
    "workspace_id",
    "path",
    "is_secret",
    "extra_perms",
    "value",
    "description",
    "account",
    "is_oauth",
    "is_expired",
    "refresh_error",
    "is_linked",
    "is_refreshed",
    "expires_at",
});

/// A variable injected by the platform into every job (`WM_WORKSPACE`,
/// `WM_TOKEN`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualVariable {
    pub name: String,
    pub value: String,
    pub description: String,
    pub is_custom: bool,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ContextualVariable { "name", "value", "description", "is_custom" });

/// Body of the create endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateVariable {
    pub path: String,
    pub value: String,
    pub is_secret: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub account: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_oauth: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub expires_at: Maybe<Timestamp>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(CreateVariable {
    "path",
    "value",
    "is_secret",
    "description",
    "account",
    "is_oauth",
    "expires_at",
});

impl CreateVariable {
    pub fn new(path: impl Into<String>, value: impl Into<String>, is_secret: bool) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            is_secret,
            ..Default::default()
        }
    }
}

/// Body of the update endpoint; every field is optional and unset fields are
/// left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditVariable {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub value: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_secret: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(EditVariable { "path", "value", "is_secret", "description" });
