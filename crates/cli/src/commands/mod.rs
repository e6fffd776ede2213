//! CLI command implementations.
//!
//! Responsibilities:
//! - Resolve configuration from the file, environment and global flags.
//! - Open sessions with the resolved login and connection tuning.
//! - Dispatch each subcommand to its handler.
//!
//! Invariants:
//! - Flag-supplied username/password win over saved-host and default credentials.
//! - Destructive operations ask for confirmation unless `--yes` is given.

pub mod admin;
pub mod config;
pub mod hosts;
pub mod poll;
pub mod rest;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;
use splunkd_client::{ConnectOptions, Credentials, MetricsCollector, Session};
use splunkd_config::{ConfigLoader, MonitorConfig};

use crate::args::{Cli, Commands};
use crate::formatters::OutputFormat;
use crate::progress::Spinner;

/// Everything a command handler needs besides its own arguments.
pub struct CommandContext {
    pub config: MonitorConfig,
    pub config_path: Option<PathBuf>,
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub output: OutputFormat,
    pub quiet: bool,
    pub yes: bool,
    pub metrics: bool,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (config, config_path) = load_config(cli)?;
        Ok(Self {
            config,
            config_path,
            address: cli.address.clone(),
            username: cli.username.clone(),
            password: cli.password.clone(),
            output: cli.output,
            quiet: cli.quiet,
            yes: cli.yes,
            metrics: cli.metrics_bind.is_some(),
        })
    }

    /// Credentials for the target address after applying flag overrides.
    pub fn credentials(&self) -> Result<Credentials> {
        let login = self.config.login_for(self.address.as_deref());
        let username = self.username.clone().unwrap_or(login.username);
        let password = match &self.password {
            Some(p) => SecretString::new(p.clone().into()),
            None => login.password,
        };
        Ok(Credentials::from_address(&login.address, username, password)?)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let options = ConnectOptions::from_config(&self.config.connection);
        if self.metrics {
            options.with_metrics(MetricsCollector::new())
        } else {
            options
        }
    }

    /// Log in to the target instance.
    pub async fn open_session(&self) -> Result<Session> {
        let credentials = self.credentials()?;
        let address = credentials.address();
        let spinner = Spinner::new(!self.quiet, format!("Connecting to {address}"));
        let session = Session::connect(credentials, self.connect_options())
            .await
            .with_context(|| format!("Failed to connect to {address}"))?;
        spinner.finish();
        Ok(session)
    }

    /// Ask before a destructive operation. `--yes` answers for the user.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// File, then environment, then global flags.
fn load_config(cli: &Cli) -> Result<(MonitorConfig, Option<PathBuf>)> {
    let mut loader = ConfigLoader::new();

    // Blank values fall through to the default location.
    if let Some(path) = &cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader
        .from_file()
        .context("Failed to load configuration file")?
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    let config_path = loader.config_path().cloned();
    let config = loader.build().context("Failed to build configuration")?;
    Ok((config, config_path))
}

pub async fn run_command(cli: Cli) -> Result<()> {
    if let Commands::Config { command } = &cli.command {
        return config::run(cli.config_path.as_deref(), command);
    }
    let ctx = CommandContext::from_cli(&cli)?;

    match cli.command {
        Commands::Poll { table, columns } => poll::run(&ctx, table.as_deref(), &columns).await,
        Commands::Watch { interval, table } => watch::run(&ctx, interval, table).await,
        Commands::Rest {
            method,
            uri,
            params,
            body,
        } => rest::run(&ctx, &method, &uri, &params, body.as_deref()).await,
        Commands::Restart => admin::restart(&ctx).await,
        Commands::DeploymentClient { target } => {
            admin::deployment_client(&ctx, target.as_deref()).await
        }
        Commands::RefreshConfig => admin::refresh_config(&ctx).await,
        Commands::Conf { file } => admin::conf(&ctx, &file).await,
        Commands::Hosts { command } => hosts::run(ctx, command),
        Commands::Config { .. } => Ok(()),
    }
}
