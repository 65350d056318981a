//! Layered configuration.
//!
//! Sources are applied in order, later ones winning:
//!
//! 1. the TOML file (`--config`, default `wmill.toml`),
//! 2. environment variables,
//! 3. command line flags.
//!
//! Layers are merged as a TOML table and deserialized once into
//! [`ClientConfig`], so every source goes through the same validation.

use std::path::Path;

use anyhow::{bail, Context};
use client::ClientConfig;
use toml::{Table, Value};

use crate::GlobalArgs;

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "wmill.toml";

/// Server root; `/api` is appended to form the API root.
pub const ENV_BASE_URL: &str = "BASE_INTERNAL_URL";
pub const ENV_TOKEN: &str = "WM_TOKEN";
pub const ENV_WORKSPACE: &str = "WM_WORKSPACE";
pub const ENV_TIMEOUT: &str = "WM_TIMEOUT_SECS";

/// Resolves the effective client configuration.
///
/// `env` looks up one environment variable; `main` passes `std::env::var`.
pub fn resolve(
    args: &GlobalArgs,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientConfig> {
    let mut table = match &args.config {
        Some(path) => read_file(path)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                read_file(default)?
            } else {
                Table::new()
            }
        }
    };
    apply_env(&mut table, env)?;
    apply_args(&mut table, args);

    if !table.contains_key("base_url") {
        bail!(
            "no API base url configured; set `base_url` in {DEFAULT_CONFIG_FILE}, \
             {ENV_BASE_URL} or --base-url"
        );
    }
    Value::Table(table)
        .try_into()
        .context("invalid client configuration")
}

fn read_file(path: &Path) -> anyhow::Result<Table> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    contents
        .parse::<Table>()
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn apply_env(table: &mut Table, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
    if let Some(root) = env(ENV_BASE_URL) {
        let api = format!("{}/api", root.trim_end_matches('/'));
        table.insert("base_url".into(), Value::String(api));
    }
    if let Some(token) = env(ENV_TOKEN) {
        table.insert("token".into(), Value::String(token));
    }
    if let Some(workspace) = env(ENV_WORKSPACE) {
        table.insert("workspace".into(), Value::String(workspace));
    }
    if let Some(timeout) = env(ENV_TIMEOUT) {
        let secs: i64 = timeout
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TIMEOUT} must be a whole number of seconds"))?;
        table.insert("timeout".into(), Value::Integer(secs));
    }
    Ok(())
}

fn apply_args(table: &mut Table, args: &GlobalArgs) {
    if let Some(url) = &args.base_url {
        table.insert("base_url".into(), Value::String(url.to_string()));
    }
    if let Some(token) = &args.token {
        table.insert("token".into(), Value::String(token.clone()));
    }
    if let Some(workspace) = &args.workspace {
        table.insert("workspace".into(), Value::String(workspace.clone()));
    }
    // A flag can only switch raising on; the file decides otherwise.
    if args.raise_on_unexpected_status {
        table.insert("raise_on_unexpected_status".into(), Value::Boolean(true));
    }
}
