//! Saved hosts and preset endpoints.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use secrecy::SecretString;
use splunkd_client::Table;
use splunkd_config::{
    ConfigLoader, MonitorConfig, default_config_path, normalize_address, save_config,
};

use crate::commands::CommandContext;
use crate::formatters::format_table;

#[derive(Subcommand)]
pub enum HostsCommand {
    /// List remembered hosts
    List,

    /// Remember the global --username/--password for an address
    Save {
        /// `host` or `host:port`
        address: String,
    },

    /// Forget a remembered host
    Forget {
        /// `host` or `host:port`
        address: String,
    },

    /// List preset ad-hoc endpoints
    Endpoints,
}

pub fn run(mut ctx: CommandContext, command: HostsCommand) -> Result<()> {
    match command {
        HostsCommand::List => {
            println!("{}", format_table(&hosts_table(&ctx), ctx.output)?);
        }
        HostsCommand::Endpoints => {
            let table = Table {
                name: "endpoints".to_string(),
                columns: vec!["uri".to_string()],
                rows: ctx.config.endpoints.iter().map(|e| vec![e.clone()]).collect(),
            };
            println!("{}", format_table(&table, ctx.output)?);
        }
        HostsCommand::Save { address } => {
            if ctx.username.is_none() && ctx.password.is_none() {
                bail!("Nothing to save: pass --username and/or --password");
            }
            let password = ctx.password.take().map(|p| SecretString::new(p.into()));
            let username = ctx.username.take();
            let key = update_file(&ctx, |config| {
                Ok(config.save_host(&address, username, password))
            })?;
            println!("Saved credentials for {key}");
        }
        HostsCommand::Forget { address } => {
            let key = update_file(&ctx, |config| {
                let key = normalize_address(&address);
                if config.hosts.remove(&key).is_none() {
                    bail!("No saved host {key}");
                }
                Ok(key)
            })?;
            println!("Forgot {key}");
        }
    }
    Ok(())
}

fn hosts_table(ctx: &CommandContext) -> Table {
    let rows = ctx
        .config
        .hosts
        .iter()
        .map(|(address, host)| {
            vec![
                address.clone(),
                host.username.clone().unwrap_or_default(),
                if host.password.is_some() { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    Table {
        name: "hosts".to_string(),
        columns: vec![
            "address".to_string(),
            "username".to_string(),
            "password_saved".to_string(),
        ],
        rows,
    }
}

/// Edit the file on disk alone, so environment and flag overrides are never persisted.
fn update_file<T>(
    ctx: &CommandContext,
    edit: impl FnOnce(&mut MonitorConfig) -> Result<T>,
) -> Result<T> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = ConfigLoader::new()
        .with_config_path(path.clone())
        .from_file()?
        .build()?;

    let value = edit(&mut config)?;
    save_config(&path, &config).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(value)
}
