//! Job models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flow::{FlowStatus, FlowValue};
use crate::script::ScriptLang;
use crate::{impl_model, AdditionalProperties, Args, JobId, Maybe, ScriptHash, Timestamp};

/// What a job executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Script,
    Preview,
    Dependencies,
    Flow,
    FlowPreview,
    #[serde(rename = "script_hub")]
    ScriptHub,
    Identity,
    FlowDependencies,
    AppDependencies,
    Noop,
    DeploymentCallback,
}

impl JobKind {
    /// Wire name, as used in the `job_kinds` filter.
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Script => "script",
            JobKind::Preview => "preview",
            JobKind::Dependencies => "dependencies",
            JobKind::Flow => "flow",
            JobKind::FlowPreview => "flowpreview",
            JobKind::ScriptHub => "script_hub",
            JobKind::Identity => "identity",
            JobKind::FlowDependencies => "flowdependencies",
            JobKind::AppDependencies => "appdependencies",
            JobKind::Noop => "noop",
            JobKind::DeploymentCallback => "deploymentcallback",
        }
    }

    pub const ALL: [JobKind; 11] = [
        JobKind::Script,
        JobKind::Preview,
        JobKind::Dependencies,
        JobKind::Flow,
        JobKind::FlowPreview,
        JobKind::ScriptHub,
        JobKind::Identity,
        JobKind::FlowDependencies,
        JobKind::AppDependencies,
        JobKind::Noop,
        JobKind::DeploymentCallback,
    ];
}

impl std::str::FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown job kind `{s}`"))
    }
}

/// A finished job.
///
/// Only `id` and `success` are guaranteed; the server omits most other
/// fields for jobs whose content was deleted, and for list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedJob {
    pub id: JobId,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parent_job: Maybe<JobId>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub created_by: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub created_at: Maybe<Timestamp>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub started_at: Maybe<Timestamp>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub duration_ms: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_path: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_hash: Maybe<ScriptHash>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Args>,
    /// Return value of the job; any JSON.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub result: Maybe<Value>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub logs: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub deleted: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_code: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_by: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_reason: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub job_kind: Maybe<JobKind>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schedule_path: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub permissioned_as: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub flow_status: Maybe<FlowStatus>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_flow: Maybe<FlowValue>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_flow_step: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub language: Maybe<ScriptLang>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub is_skipped: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub email: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub visible_to_owner: Maybe<bool>,
    /// Peak memory in kB.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub mem_peak: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub tag: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub priority: Maybe<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(CompletedJob {
    "id",
    "success",
    "workspace_id",
    "parent_job",
    "created_by",
    "created_at",
    "started_at",
    "duration_ms",
    "script_path",
    "script_hash",
    "args",
    "result",
    "logs",
    "deleted",
    "raw_code",
    "canceled",
    "canceled_by",
    "canceled_reason",
    "job_kind",
    "schedule_path",
    "permissioned_as",
    "flow_status",
    "raw_flow",
    "is_flow_step",
    "language",
    "is_skipped",
    "email",
    "visible_to_owner",
    "mem_peak",
    "tag",
    "priority",
});

/// Filters accepted by the completed-job listing. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletedJobFilter {
    pub order_desc: Option<bool>,
    pub created_by: Option<String>,
    pub parent_job: Option<JobId>,
    pub script_path_exact: Option<String>,
    pub script_path_start: Option<String>,
    pub script_hash: Option<ScriptHash>,
    pub created_before: Option<Timestamp>,
    pub created_after: Option<Timestamp>,
    pub success: Option<bool>,
    pub job_kinds: Vec<JobKind>,
    pub is_skipped: Option<bool>,
    pub is_flow_step: Option<bool>,
}

impl CompletedJobFilter {
    /// Query pairs in wire form; `job_kinds` is sent comma-separated.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(v) = value {
                q.push((key, v));
            }
        };
        push("order_desc", self.order_desc.map(|b| b.to_string()));
        push("created_by", self.created_by.clone());
        push("parent_job", self.parent_job.as_ref().map(JobId::to_string));
        push("script_path_exact", self.script_path_exact.clone());
        push("script_path_start", self.script_path_start.clone());
        push("script_hash", self.script_hash.as_ref().map(ScriptHash::to_string));
        push("created_before", self.created_before.map(|t| t.to_string()));
        push("created_after", self.created_after.map(|t| t.to_string()));
        push("success", self.success.map(|b| b.to_string()));
        push(
            "job_kinds",
            (!self.job_kinds.is_empty()).then(|| {
                self.job_kinds
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            }),
        );
        push("is_skipped", self.is_skipped.map(|b| b.to_string()));
        push("is_flow_step", self.is_flow_step.map(|b| b.to_string()));
        q
    }
}
