//! Schedule models.

use serde::{Deserialize, Serialize};

use crate::flow::Retry;
use crate::{impl_model, AdditionalProperties, Args, ExtraPerms, Maybe, Timestamp};

/// A cron schedule as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub path: String,
    pub edited_by: String,
    pub edited_at: Timestamp,
    /// Six-field cron expression (seconds first).
    pub schedule: String,
    pub timezone: String,
    pub enabled: bool,
    pub script_path: String,
    pub is_flow: bool,
    pub extra_perms: ExtraPerms,
    pub email: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Args>,
    /// Last scheduling error, if the previous tick failed.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub error: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_times: Maybe<f64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_exact: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_extra_args: Maybe<Args>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery_times: Maybe<f64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery_extra_args: Maybe<Args>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub ws_error_handler_muted: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<Retry>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub summary: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub no_flow_overlap: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub tag: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(Schedule {
    "path",
    "edited_by",
    "edited_at",
    "schedule",
    "timezone",
    "enabled",
    "script_path",
    "is_flow",
    "extra_perms",
    "email",
    "args",
    "error",
    "on_failure",
    "on_failure_times",
    "on_failure_exact",
    "on_failure_extra_args",
    "on_recovery",
    "on_recovery_times",
    "on_recovery_extra_args",
    "ws_error_handler_muted",
    "retry",
    "summary",
    "no_flow_overlap",
    "tag",
});

/// Body of the schedule update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditSchedule {
    pub schedule: String,
    pub timezone: String,
    pub args: Args,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_times: Maybe<f64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_exact: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_failure_extra_args: Maybe<Args>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery_times: Maybe<f64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub on_recovery_extra_args: Maybe<Args>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub ws_error_handler_muted: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<Retry>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub no_flow_overlap: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub summary: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub tag: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(EditSchedule {
    "schedule",
    "timezone",
    "args",
    "on_failure",
    "on_failure_times",
    "on_failure_exact",
    "on_failure_extra_args",
    "on_recovery",
    "on_recovery_times",
    "on_recovery_extra_args",
    "ws_error_handler_muted",
    "retry",
    "no_flow_overlap",
    "summary",
    "tag",
});

impl EditSchedule {
    pub fn new(schedule: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            schedule: schedule.into(),
            timezone: timezone.into(),
            ..Default::default()
        }
    }
}
