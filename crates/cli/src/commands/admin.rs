//! Administrative operations: restart, deployment client, configuration reload and dump.

use anyhow::{Context, Result};

use crate::commands::CommandContext;
use crate::formatters::format_report;
use crate::progress::Spinner;

pub async fn restart(ctx: &CommandContext) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let address = session.credentials().address();
    if !ctx.confirm(&format!("Restart splunkd on {address}?"))? {
        eprintln!("Restart cancelled.");
        return Ok(());
    }

    let spinner = Spinner::new(!ctx.quiet, format!("Restarting {address}"));
    session.restart_instance().await.context("Restart failed")?;
    spinner.finish();
    println!("Restart requested on {address}; the session has ended.");
    Ok(())
}

pub async fn deployment_client(ctx: &CommandContext, target: Option<&str>) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let address = session.credentials().address();
    let prompt = match target {
        Some(target) => format!("Point {address} at deployment server {target} and restart?"),
        None => format!("Disable the deployment client on {address} and restart?"),
    };
    if !ctx.confirm(&prompt)? {
        eprintln!("Deployment client change cancelled.");
        return Ok(());
    }

    session
        .change_deployment_client(target)
        .await
        .context("Deployment client change failed")?;
    match target {
        Some(target) => println!("Deployment server set to {target}; restart requested."),
        None => println!("Deployment client disabled; restart requested."),
    }
    Ok(())
}

pub async fn refresh_config(ctx: &CommandContext) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let spinner = Spinner::new(!ctx.quiet, "Refreshing configuration");
    let report = session
        .refresh_configuration()
        .await
        .context("Configuration refresh failed")?;
    spinner.finish();

    println!("{}", format_report(&report, ctx.output)?);
    if !report.is_clean() {
        tracing::warn!(
            failed = report.failures().count(),
            "Some endpoints could not be reloaded"
        );
    }
    Ok(())
}

pub async fn conf(ctx: &CommandContext, file: &str) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let text = session
        .configuration_contents(file)
        .await
        .with_context(|| format!("Reading {file}.conf failed"))?;
    print!("{text}");
    Ok(())
}
