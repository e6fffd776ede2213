//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not load configuration (see `commands::load_config`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "splunkd-cli")]
#[command(
    about = "Monitor and administer a splunkd instance over its management port",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunkd-cli -a idx01:8089 poll\n  splunkd-cli -a idx01:8089 poll --table cluster_peers\n  splunkd-cli watch --interval 30\n  splunkd-cli rest GET '/services/apps/local?count=5'\n  splunkd-cli deployment-client ds01:8089 --yes\n  splunkd-cli conf server\n"
)]
pub struct Cli {
    /// Management address of the instance (host or host:port)
    #[arg(short, long, global = true, env = "SPLUNKD_ADDRESS")]
    pub address: Option<String>,

    /// Username for the session login
    #[arg(short, long, global = true, env = "SPLUNKD_USERNAME")]
    pub username: Option<String>,

    /// Password for the session login
    #[arg(short, long, global = true, env = "SPLUNKD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: OutputFormat,

    /// Path to a custom configuration file (overrides default location).
    ///
    /// Can also be set via SPLUNKD_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "SPLUNKD_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Suppress progress output (spinners).
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// OTLP collector endpoint for trace export (e.g. http://localhost:4317)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Expose Prometheus metrics on this address (e.g. 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the instance once and print the snapshot
    Poll {
        /// Print only this table (e.g. apps, cluster_peers)
        #[arg(long, value_name = "NAME")]
        table: Option<String>,

        /// Columns to project the table onto (comma-separated)
        #[arg(long, value_delimiter = ',', requires = "table")]
        columns: Vec<String>,
    },

    /// Poll repeatedly until interrupted
    Watch {
        /// Seconds between polls (defaults to the configured poll interval)
        #[arg(long)]
        interval: Option<u64>,

        /// Print only this table on each poll
        #[arg(long, value_name = "NAME")]
        table: Option<String>,
    },

    /// Send an ad-hoc REST request
    Rest {
        /// HTTP method (GET, POST, DELETE)
        method: String,

        /// Endpoint path with optional inline query (e.g. '/services/apps/local?count=5')
        uri: String,

        /// Extra query parameters as key=value; these override inline ones
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Form-encoded request body
        #[arg(long)]
        body: Option<String>,
    },

    /// Restart the instance
    Restart,

    /// Point the instance's deployment client at a server, or disable it
    DeploymentClient {
        /// Deployment server `host:port`; omit to disable the client
        target: Option<String>,
    },

    /// Reload configuration endpoints without a restart
    RefreshConfig,

    /// Print the stanzas of a configuration file (e.g. server, inputs)
    Conf {
        /// Configuration file name without `.conf`
        file: String,
    },

    /// List or save remembered hosts
    Hosts {
        #[command(subcommand)]
        command: commands::hosts::HostsCommand,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },
}
