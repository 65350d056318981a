//! Script models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{impl_model, AdditionalProperties, Maybe, ScriptHash};

/// Language a script is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLang {
    Deno,
    Python3,
    Go,
    Bash,
    Postgresql,
    Nativets,
    Bun,
}

/// Role of a script within the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    #[default]
    Script,
    Failure,
    Trigger,
    Command,
    Approval,
}

/// Unsaved edits stored alongside a deployed script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDraft {
    pub content: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub language: Maybe<ScriptLang>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ScriptDraft { "content", "language", "schema" });

/// A deployed script version.
///
/// Returned by the by-path, by-hash and with-draft endpoints; `draft` and
/// `draft_only` are only populated by the latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub path: String,
    pub summary: String,
    pub description: String,
    pub content: String,
    pub language: ScriptLang,
    pub hash: ScriptHash,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parent_hash: Maybe<ScriptHash>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_template: Maybe<bool>,
    /// Resolved dependency lock, one requirement per entry.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub lock: Maybe<Vec<String>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub kind: Maybe<ScriptKind>,
    /// Worker tag the script is routed to.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub tag: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub draft_only: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub envs: Maybe<Vec<String>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub concurrent_limit: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub concurrency_time_window_s: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub cache_ttl: Maybe<f64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub dedicated_worker: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub ws_error_handler_muted: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub priority: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub restart_unless_cancelled: Maybe<bool>,
    /// Execution timeout in seconds.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub timeout: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub delete_after_use: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub deployment_message: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub draft: Maybe<ScriptDraft>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(Script {
    "path",
    "summary",
    "description",
    "content",
    "language",
    "hash",
    "parent_hash",
    "schema",
    "is_template",
    "lock",
    "kind",
    "tag",
    "draft_only",
    "envs",
    "concurrent_limit",
    "concurrency_time_window_s",
    "cache_ttl",
    "dedicated_worker",
    "ws_error_handler_muted",
    "priority",
    "restart_unless_cancelled",
    "timeout",
    "delete_after_use",
    "deployment_message",
    "draft",
});
