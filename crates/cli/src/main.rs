//! `wmill` command line entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments**: global connection flags plus one command from a
//!    resource group (`job`, `flow`, `script`, `schedule`, `resource`,
//!    `variable`, `audit`).
//! 2. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter`, optional JSON output and, when
//!    `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OpenTelemetry OTLP exporter.
//!    Every `tracing` event emitted by the `client` crate flows through here.
//! 3. **Resolve configuration**: layer `wmill.toml`, environment variables and
//!    flags into one [`client::ClientConfig`] (see [`settings`]).
//! 4. **Run the command**: call the async form of the matching endpoint and
//!    print the result (see [`commands`]).

mod commands;
mod settings;
mod telemetry;

use std::path::PathBuf;

use clap::Parser;
use client::Client;
use tracing::debug;
use url::Url;

use crate::commands::Group;

/// Command line client for the Windmill API.
#[derive(Debug, Parser)]
#[command(name = "wmill", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub group: Group,
}

/// Connection flags shared by every command.
#[derive(Debug, Default, clap::Args)]
pub struct GlobalArgs {
    /// Configuration file. A missing `wmill.toml` is ignored; a missing file
    /// named here is an error.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API root, e.g. `https://app.windmill.dev/api`.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<Url>,

    /// Bearer token.
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Workspace the command operates on.
    #[arg(long, short = 'w', global = true, value_name = "WS")]
    pub workspace: Option<String>,

    /// Fail on response statuses the endpoint does not document.
    #[arg(long, global = true)]
    pub raise_on_unexpected_status: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.global.json_logs)?;

    let config = settings::resolve(&cli.global, |name| std::env::var(name).ok())?;
    debug!(base_url = %config.base_url(), "configuration resolved");
    let client = Client::new(config)?;

    let output = commands::run(&client, cli.group).await?;
    println!("{output}");
    Ok(())
}
