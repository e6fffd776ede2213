//! Configuration file management commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use splunkd_config::{default_config_path, write_default_config};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a configuration file holding the built-in defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

/// Runs without loading the configuration, so a broken file can be replaced.
pub fn run(config_path: Option<&Path>, command: &ConfigCommand) -> Result<()> {
    let path = match config_path.filter(|p| !p.to_string_lossy().trim().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    match command {
        ConfigCommand::Init { force } => {
            let written = write_default_config(&path, *force)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            println!("Wrote default configuration to {}", written.display());
        }
        ConfigCommand::Path => println!("{}", path.display()),
    }
    Ok(())
}
