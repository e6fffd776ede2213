//! splunkd CLI - command-line front end for monitoring a splunkd instance.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging, optional trace export and optional Prometheus metrics.
//! - Run one command and exit with a structured exit code.
//!
//! Does NOT handle:
//! - Polling, REST or domain logic (see `crates/client`).
//! - Configuration merging rules (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries command output only.

mod args;
mod commands;
mod error;
mod formatters;
mod progress;

use args::Cli;
use clap::Parser;
use commands::run_command;
use error::{ExitCode, ExitCodeExt, describe};
use splunkd_client::{MetricsExporter, TracingConfig};
use splunkd_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name("splunkd-cli")
        .with_json(cli.log_json)
        .with_default_filter("warn");
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!(
                    "Metrics exporter started on http://{}/metrics",
                    exporter.bind_addr()
                );
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let exit_code = match run_command(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            let code = e.exit_code();
            if code == ExitCode::Interrupted {
                eprintln!("^C\nOperation cancelled by user");
            } else {
                eprintln!("{}", describe(&e));
            }
            code
        }
    };

    // Flush pending spans before exiting.
    tracing_guard.shutdown();

    std::process::exit(exit_code.as_i32());
}
