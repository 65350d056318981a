//! Audit log models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{impl_model, AdditionalProperties, Maybe, Timestamp};

macro_rules! operations {
    ($($variant:ident => $wire:literal,)*) => {
        /// Operation recorded by an audit log entry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum AuditLogOperation {
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl AuditLogOperation {
            /// Every known operation.
            pub const ALL: &'static [AuditLogOperation] = &[$(AuditLogOperation::$variant),*];

            /// Wire name, e.g. `jobs.run.script`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(AuditLogOperation::$variant => $wire,)*
                }
            }
        }
    };
}

operations! {
    AccountDelete => "account.delete",
    AppsCreate => "apps.create",
    AppsDelete => "apps.delete",
    AppsUpdate => "apps.update",
    FlowsArchive => "flows.archive",
    FlowsCreate => "flows.create",
    FlowsDelete => "flows.delete",
    FlowsUpdate => "flows.update",
    FolderAddOwner => "folder.add_owner",
    FolderCreate => "folder.create",
    FolderDelete => "folder.delete",
    FolderRemoveOwner => "folder.remove_owner",
    FolderUpdate => "folder.update",
    GroupAdduser => "group.adduser",
    GroupCreate => "group.create",
    GroupDelete => "group.delete",
    GroupEdit => "group.edit",
    GroupRemoveuser => "group.removeuser",
    IgroupAdduser => "igroup.adduser",
    IgroupCreate => "igroup.create",
    IgroupDelete => "igroup.delete",
    IgroupRemoveuser => "igroup.removeuser",
    Jobs => "jobs",
    JobsCancel => "jobs.cancel",
    JobsDelete => "jobs.delete",
    JobsDisapproval => "jobs.disapproval",
    JobsFlowDependencies => "jobs.flow_dependencies",
    JobsForceCancel => "jobs.force_cancel",
    JobsRun => "jobs.run",
    JobsRunDependencies => "jobs.run.dependencies",
    JobsRunFlow => "jobs.run.flow",
    JobsRunFlowPreview => "jobs.run.flow_preview",
    JobsRunIdentity => "jobs.run.identity",
    JobsRunNoop => "jobs.run.noop",
    JobsRunPreview => "jobs.run.preview",
    JobsRunScript => "jobs.run.script",
    JobsRunScriptHub => "jobs.run.script_hub",
    OauthLogin => "oauth.login",
    OauthSignup => "oauth.signup",
    OpenaiRequest => "openai.request",
    ResourcesCreate => "resources.create",
    ResourcesDelete => "resources.delete",
    ResourcesUpdate => "resources.update",
    ResourceTypesCreate => "resource_types.create",
    ResourceTypesDelete => "resource_types.delete",
    ResourceTypesUpdate => "resource_types.update",
    ScheduleCreate => "schedule.create",
    ScheduleDelete => "schedule.delete",
    ScheduleEdit => "schedule.edit",
    ScheduleSetenabled => "schedule.setenabled",
    ScriptsArchive => "scripts.archive",
    ScriptsCreate => "scripts.create",
    ScriptsDelete => "scripts.delete",
    ScriptsUpdate => "scripts.update",
    UsersAcceptInvite => "users.accept_invite",
    UsersAddGlobal => "users.add_global",
    UsersAddToWorkspace => "users.add_to_workspace",
    UsersCreate => "users.create",
    UsersDeclineInvite => "users.decline_invite",
    UsersDelete => "users.delete",
    UsersImpersonate => "users.impersonate",
    UsersLeaveWorkspace => "users.leave_workspace",
    UsersLogin => "users.login",
    UsersLogout => "users.logout",
    UsersSetpassword => "users.setpassword",
    UsersTokenCreate => "users.token.create",
    UsersTokenDelete => "users.token.delete",
    UsersUpdate => "users.update",
    VariablesCreate => "variables.create",
    VariablesDecryptSecret => "variables.decrypt_secret",
    VariablesDelete => "variables.delete",
    VariablesUpdate => "variables.update",
    WorkspacesArchive => "workspaces.archive",
    WorkspacesCreate => "workspaces.create",
    WorkspacesDelete => "workspaces.delete",
    WorkspacesEditAutoInviteDomain => "workspaces.edit_auto_invite_domain",
    WorkspacesEditCommandScript => "workspaces.edit_command_script",
    WorkspacesEditCopilotConfig => "workspaces.edit_copilot_config",
    WorkspacesEditDeployTo => "workspaces.edit_deploy_to",
    WorkspacesEditErrorHandler => "workspaces.edit_error_handler",
    WorkspacesEditWebhook => "workspaces.edit_webhook",
    WorkspacesUnarchive => "workspaces.unarchive",
    WorkspacesUpdate => "workspaces.update",
}

impl std::fmt::Display for AuditLogOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuditLogOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown audit operation `{s}`"))
    }
}

/// Kind of change an audit entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Created,
    Updated,
    Delete,
    Execute,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Created => "Created",
            ActionKind::Updated => "Updated",
            ActionKind::Delete => "Delete",
            ActionKind::Execute => "Execute",
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" | "create" => Ok(ActionKind::Created),
            "updated" | "update" => Ok(ActionKind::Updated),
            "delete" | "deleted" => Ok(ActionKind::Delete),
            "execute" => Ok(ActionKind::Execute),
            _ => Err(format!("unknown action kind `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    pub timestamp: Timestamp,
    pub username: String,
    pub operation: AuditLogOperation,
    pub action_kind: ActionKind,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub resource: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parameters: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(AuditLog {
    "id",
    "timestamp",
    "username",
    "operation",
    "action_kind",
    "resource",
    "parameters",
});

/// Filters accepted by the audit log listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLogFilter {
    pub before: Option<Timestamp>,
    pub after: Option<Timestamp>,
    pub username: Option<String>,
    pub operation: Option<AuditLogOperation>,
    pub resource: Option<String>,
    pub action_kind: Option<ActionKind>,
}

impl AuditLogFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("before", self.before.map(|t| t.to_string())),
            ("after", self.after.map(|t| t.to_string())),
            ("username", self.username.clone()),
            ("operation", self.operation.map(|o| o.as_str().to_string())),
            ("resource", self.resource.clone()),
            ("action_kind", self.action_kind.map(|k| k.as_str().to_string())),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}
