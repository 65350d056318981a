//! Command groups and their dispatch onto the async endpoint forms.
//!
//! Every command returns the text to print: the decoded payload as pretty
//! JSON, or the status line and raw body when the response carries no
//! payload (an undocumented status with raising turned off).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use client::api::{audit, flow, job, resource, schedule, script, variable};
use client::{Client, Response};
use models::audit::{ActionKind, AuditLogFilter, AuditLogOperation};
use models::flow::{ArchiveFlowBody, OpenFlowWPath};
use models::job::{CompletedJobFilter, JobKind};
use models::schedule::EditSchedule;
use models::variable::{CreateVariable, EditVariable};
use models::{ItemPath, JobId, Maybe, Pagination, ScriptHash, Timestamp, WorkspaceId};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum Group {
    /// Completed jobs.
    #[command(subcommand)]
    Job(JobCommand),
    /// Flows.
    #[command(subcommand)]
    Flow(FlowCommand),
    /// Scripts.
    #[command(subcommand)]
    Script(ScriptCommand),
    /// Schedules.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Resources.
    #[command(subcommand)]
    Resource(ResourceCommand),
    /// Variables and secrets.
    #[command(subcommand)]
    Variable(VariableCommand),
    /// Audit logs.
    #[command(subcommand)]
    Audit(AuditCommand),
}

/// Page selection shared by list commands.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct PageArgs {
    /// One-based page number.
    #[arg(long)]
    pub page: Option<u32>,
    /// Items per page (at most 10000).
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination {
            page: args.page,
            per_page: args.per_page.map(|n| n.min(Pagination::MAX_PER_PAGE)),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Shows one completed job.
    Get {
        #[arg(value_parser = job_id)]
        id: JobId,
    },
    /// Deletes the stored content of a completed job.
    Delete {
        #[arg(value_parser = job_id)]
        id: JobId,
    },
    /// Lists completed jobs.
    List {
        #[arg(long)]
        success: Option<bool>,
        #[arg(long)]
        created_by: Option<String>,
        #[arg(long)]
        script_path_start: Option<String>,
        /// Job kind filter; repeat for several kinds.
        #[arg(long = "kind")]
        kinds: Vec<JobKind>,
        #[arg(long)]
        order_desc: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Shows only the result of a completed job.
    Result {
        #[arg(value_parser = job_id)]
        id: JobId,
    },
}

#[derive(Debug, Subcommand)]
pub enum FlowCommand {
    Get {
        #[arg(value_parser = item_path)]
        path: ItemPath,
    },
    /// Creates a flow from a JSON definition.
    Create {
        /// File holding the flow, including its `path`.
        file: PathBuf,
    },
    /// Replaces the flow at `path` with a JSON definition.
    Update {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        file: PathBuf,
    },
    Archive {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        /// Restore instead of archiving.
        #[arg(long)]
        unarchive: bool,
    },
    /// Shows a flow published on the hub.
    Hub { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ScriptCommand {
    Get {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        /// Include the unsaved draft.
        #[arg(long)]
        draft: bool,
    },
    /// Deletes one script version by hash.
    DeleteHash {
        #[arg(value_parser = script_hash)]
        hash: ScriptHash,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    List {
        #[arg(long, value_parser = item_path)]
        path: Option<ItemPath>,
        #[arg(long)]
        is_flow: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Changes the cron expression and timezone of a schedule.
    Update {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        #[arg(long)]
        schedule: String,
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// JSON object of arguments passed to the scheduled runnable.
        #[arg(long)]
        args: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    List {
        /// Comma-separated resource types.
        #[arg(long)]
        resource_type: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum VariableCommand {
    List {
        #[arg(long)]
        path_start: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Lists the variables injected into every job.
    Contextual,
    Get {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        /// Return secrets without decrypting them.
        #[arg(long)]
        no_decrypt: bool,
    },
    /// Prints the value alone.
    Value {
        #[arg(value_parser = item_path)]
        path: ItemPath,
    },
    Exists {
        #[arg(value_parser = item_path)]
        path: ItemPath,
    },
    Create {
        path: String,
        value: String,
        #[arg(long)]
        secret: bool,
        #[arg(long, default_value = "")]
        description: String,
        /// `value` was produced by `variable encrypt`.
        #[arg(long)]
        already_encrypted: bool,
    },
    /// Updates only the given fields.
    Update {
        #[arg(value_parser = item_path)]
        path: ItemPath,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        secret: Option<bool>,
        /// Moves the variable to a new path.
        #[arg(long)]
        rename: Option<String>,
    },
    Delete {
        #[arg(value_parser = item_path)]
        path: ItemPath,
    },
    /// Encrypts a value with the workspace key.
    Encrypt { value: String },
}

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    List {
        #[arg(long)]
        username: Option<String>,
        /// Operation name, e.g. `jobs.run.script`.
        #[arg(long)]
        operation: Option<AuditLogOperation>,
        #[arg(long)]
        resource: Option<String>,
        #[arg(long)]
        action_kind: Option<ActionKind>,
        /// RFC 3339 lower bound.
        #[arg(long, value_parser = timestamp)]
        after: Option<Timestamp>,
        /// RFC 3339 upper bound.
        #[arg(long, value_parser = timestamp)]
        before: Option<Timestamp>,
        #[command(flatten)]
        page: PageArgs,
    },
    Get { id: i64 },
}

/// Runs one command and returns what to print.
pub async fn run(client: &Client, group: Group) -> anyhow::Result<String> {
    match group {
        Group::Job(command) => run_job(client, command).await,
        Group::Flow(command) => run_flow(client, command).await,
        Group::Script(command) => run_script(client, command).await,
        Group::Schedule(command) => run_schedule(client, command).await,
        Group::Resource(command) => run_resource(client, command).await,
        Group::Variable(command) => run_variable(client, command).await,
        Group::Audit(command) => run_audit(client, command).await,
    }
}

async fn run_job(client: &Client, command: JobCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    match command {
        JobCommand::Get { id } => render(&job::get_completed_job::detailed(client, &ws, &id).await?),
        JobCommand::Delete { id } => {
            render(&job::delete_completed_job::detailed(client, &ws, &id).await?)
        }
        JobCommand::List {
            success,
            created_by,
            script_path_start,
            kinds,
            order_desc,
            page,
        } => {
            let filter = CompletedJobFilter {
                success,
                created_by,
                script_path_start,
                job_kinds: kinds,
                order_desc,
                ..Default::default()
            };
            render(&job::list_completed_jobs::detailed(client, &ws, &filter, page.into()).await?)
        }
        JobCommand::Result { id } => {
            render(&job::get_completed_job_result::detailed(client, &ws, &id).await?)
        }
    }
}

async fn run_flow(client: &Client, command: FlowCommand) -> anyhow::Result<String> {
    match command {
        FlowCommand::Hub { id } => render(&flow::get_hub_flow_by_id::detailed(client, id).await?),
        FlowCommand::Get { path } => {
            let ws = workspace(client)?;
            render(&flow::get_flow_by_path::detailed(client, &ws, &path).await?)
        }
        FlowCommand::Create { file } => {
            let ws = workspace(client)?;
            let body: OpenFlowWPath = read_json(&file)?;
            render(&flow::create_flow::detailed(client, &ws, &body).await?)
        }
        FlowCommand::Update { path, file } => {
            let ws = workspace(client)?;
            let body: OpenFlowWPath = read_json(&file)?;
            render(&flow::update_flow::detailed(client, &ws, &path, &body).await?)
        }
        FlowCommand::Archive { path, unarchive } => {
            let ws = workspace(client)?;
            let body = ArchiveFlowBody {
                archived: Maybe::Set(!unarchive),
                ..Default::default()
            };
            render(&flow::archive_flow_by_path::detailed(client, &ws, &path, &body).await?)
        }
    }
}

async fn run_script(client: &Client, command: ScriptCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    match command {
        ScriptCommand::Get { path, draft: false } => {
            render(&script::get_script_by_path::detailed(client, &ws, &path).await?)
        }
        ScriptCommand::Get { path, draft: true } => {
            render(&script::get_script_by_path_with_draft::detailed(client, &ws, &path).await?)
        }
        ScriptCommand::DeleteHash { hash } => {
            render(&script::delete_script_by_hash::detailed(client, &ws, &hash).await?)
        }
    }
}

async fn run_schedule(client: &Client, command: ScheduleCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    match command {
        ScheduleCommand::List { path, is_flow, page } => render(
            &schedule::list_schedules::detailed(client, &ws, page.into(), path.as_ref(), is_flow)
                .await?,
        ),
        ScheduleCommand::Update {
            path,
            schedule: cron,
            timezone,
            args,
            summary,
        } => {
            let mut body = EditSchedule::new(cron, timezone);
            if let Some(args) = args {
                body.args = serde_json::from_str(&args).context("--args must be a JSON object")?;
            }
            body.summary = summary.map_or(Maybe::Unset, Maybe::Set);
            render(&schedule::update_schedule::detailed(client, &ws, &path, &body).await?)
        }
    }
}

async fn run_resource(client: &Client, command: ResourceCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    let ResourceCommand::List {
        resource_type,
        page,
    } = command;
    render(
        &resource::list_resource::detailed(client, &ws, page.into(), resource_type.as_deref())
            .await?,
    )
}

async fn run_variable(client: &Client, command: VariableCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    match command {
        VariableCommand::List { path_start, page } => render(
            &variable::list_variable::detailed(client, &ws, path_start.as_deref(), page.into())
                .await?,
        ),
        VariableCommand::Contextual => {
            render(&variable::list_contextual_variables::detailed(client, &ws).await?)
        }
        VariableCommand::Get { path, no_decrypt } => {
            let decrypt = no_decrypt.then_some(false);
            render(&variable::get_variable::detailed(client, &ws, &path, decrypt, None).await?)
        }
        VariableCommand::Value { path } => {
            render(&variable::get_variable_value::detailed(client, &ws, &path).await?)
        }
        VariableCommand::Exists { path } => {
            render(&variable::exists_variable::detailed(client, &ws, &path).await?)
        }
        VariableCommand::Create {
            path,
            value,
            secret,
            description,
            already_encrypted,
        } => {
            let mut body = CreateVariable::new(path, value, secret);
            body.description = description;
            let encrypted = already_encrypted.then_some(true);
            render(&variable::create_variable::detailed(client, &ws, &body, encrypted).await?)
        }
        VariableCommand::Update {
            path,
            value,
            description,
            secret,
            rename,
        } => {
            let body = EditVariable {
                path: rename.map_or(Maybe::Unset, Maybe::Set),
                value: value.map_or(Maybe::Unset, Maybe::Set),
                is_secret: secret.map_or(Maybe::Unset, Maybe::Set),
                description: description.map_or(Maybe::Unset, Maybe::Set),
                ..Default::default()
            };
            render(&variable::update_variable::detailed(client, &ws, &path, &body, None).await?)
        }
        VariableCommand::Delete { path } => {
            render(&variable::delete_variable::detailed(client, &ws, &path).await?)
        }
        VariableCommand::Encrypt { value } => {
            render(&variable::encrypt_value::detailed(client, &ws, &value).await?)
        }
    }
}

async fn run_audit(client: &Client, command: AuditCommand) -> anyhow::Result<String> {
    let ws = workspace(client)?;
    match command {
        AuditCommand::List {
            username,
            operation,
            resource,
            action_kind,
            after,
            before,
            page,
        } => {
            let filter = AuditLogFilter {
                before,
                after,
                username,
                operation,
                resource,
                action_kind,
            };
            render(&audit::list_audit_logs::detailed(client, &ws, &filter, page.into()).await?)
        }
        AuditCommand::Get { id } => render(&audit::get_audit_log::detailed(client, &ws, id).await?),
    }
}

/// Formats a response for stdout.
pub fn render<T: Serialize>(response: &Response<T>) -> anyhow::Result<String> {
    match response.parsed()? {
        Some(payload) => Ok(serde_json::to_string_pretty(&payload)?),
        None => Ok(format!(
            "{}\n{}",
            response.status(),
            String::from_utf8_lossy(response.content())
        )),
    }
}

fn workspace(client: &Client) -> anyhow::Result<WorkspaceId> {
    client
        .config()
        .workspace()
        .cloned()
        .context("no workspace configured; set `workspace` in wmill.toml, WM_WORKSPACE or --workspace")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

fn item_path(s: &str) -> Result<ItemPath, String> {
    ItemPath::new(s).ok_or_else(|| "path must not be empty".to_string())
}

fn job_id(s: &str) -> Result<JobId, String> {
    JobId::new(s).ok_or_else(|| "job id must not be empty".to_string())
}

fn script_hash(s: &str) -> Result<ScriptHash, String> {
    ScriptHash::new(s).ok_or_else(|| "hash must not be empty".to_string())
}

fn timestamp(s: &str) -> Result<Timestamp, String> {
    Timestamp::parse_rfc3339(s).ok_or_else(|| format!("`{s}` is not an RFC 3339 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use async_trait::async_trait;
    use bytes::Bytes;
    use clap::Parser;
    use client::{
        BlockingTransport, ClientConfig, ClientError, HeaderMap, RawRequest, RawResponse,
        StatusCode, Transport,
    };
    use std::sync::{Arc, Mutex};

    /// Answers every request with one canned reply and records the URLs seen.
    struct Canned {
        status: StatusCode,
        body: &'static str,
        urls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn reply(&self, request: RawRequest) -> RawResponse {
            self.urls.lock().unwrap().push(request.url.to_string());
            RawResponse {
                status: self.status,
                headers: HeaderMap::new(),
                content: Bytes::from_static(self.body.as_bytes()),
            }
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

    fn client_with(status: StatusCode, body: &'static str, workspace: Option<&str>) -> (Client, Arc<Canned>) {
        let canned = Arc::new(Canned {
            status,
            body,
            urls: Mutex::new(Vec::new()),
        });
        let mut config = ClientConfig::parse("http://wm.test/api").unwrap();
        if let Some(ws) = workspace {
            config = config.with_workspace(WorkspaceId::new(ws).unwrap());
        }
        let client = Client::with_transport(config, canned.clone(), canned.clone());
        (client, canned)
    }

    fn group(args: &[&str]) -> Group {
        let argv = std::iter::once("wmill").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().group
    }

    #[tokio::test]
    async fn payload_is_printed_as_pretty_json() {
        let (client, canned) = client_with(StatusCode::OK, "true", Some("demo"));

        let out = run(&client, group(&["variable", "exists", "u/admin/api_key"]))
            .await
            .unwrap();

        assert_eq!(out, "true");
        assert_eq!(
            canned.urls.lock().unwrap().as_slice(),
            ["http://wm.test/api/w/demo/variables/exists/u/admin/api_key"]
        );
    }

    #[tokio::test]
    async fn absent_payload_prints_status_and_body() {
        let (client, _) = client_with(StatusCode::NOT_FOUND, "job nope not found", Some("demo"));

        let out = run(&client, group(&["job", "get", "nope"])).await.unwrap();

        assert_eq!(out, "404 Not Found\njob nope not found");
    }

    #[tokio::test]
    async fn missing_workspace_is_reported() {
        let (client, canned) = client_with(StatusCode::OK, "[]", None);

        let err = run(&client, group(&["audit", "list"])).await.unwrap_err();

        assert!(err.to_string().contains("no workspace configured"));
        assert!(canned.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn hub_flow_needs_no_workspace() {
        let (client, canned) = client_with(StatusCode::OK, r#"{"flow":{"summary":"s","value":{"modules":[]}}}"#, None);

        run(&client, group(&["flow", "hub", "42"])).await.unwrap();

        assert_eq!(
            canned.urls.lock().unwrap().as_slice(),
            ["http://wm.test/api/flows/hub/get/42"]
        );
    }

    #[tokio::test]
    async fn list_flags_become_query_parameters() {
        let (client, canned) = client_with(StatusCode::OK, "[]", Some("demo"));

        let out = run(
            &client,
            group(&["job", "list", "--success", "true", "--kind", "flow", "--kind", "script", "--per-page", "5"]),
        )
        .await
        .unwrap();

        assert_eq!(out, "[]");
        let urls = canned.urls.lock().unwrap();
        let url = url::Url::parse(&urls[0]).unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("success".into(), "true".into())));
        assert!(query.contains(&("job_kinds".into(), "flow,script".into())));
        assert!(query.contains(&("per_page".into(), "5".into())));
    }

    #[test]
    fn unknown_job_kind_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["wmill", "job", "list", "--kind", "cron"]).is_err());
    }

    #[test]
    fn page_size_is_clamped() {
        let page: Pagination = PageArgs {
            page: Some(2),
            per_page: Some(50_000),
        }
        .into();
        assert_eq!(page, Pagination::new(2, Pagination::MAX_PER_PAGE));
    }
}
