//! One-shot snapshot poll.

use anyhow::{Context, Result, anyhow};
use splunkd_client::{Snapshot, Table};

use crate::commands::CommandContext;
use crate::formatters::{OutputFormat, format_snapshot, format_table};
use crate::progress::PollProgress;

pub async fn run(ctx: &CommandContext, table: Option<&str>, columns: &[String]) -> Result<()> {
    let mut session = ctx.open_session().await?;

    let mut progress = PollProgress::new(!ctx.quiet);
    let snapshot = session.poll(&mut progress).await.context("Poll failed")?;
    progress.finish();

    println!("{}", render(&snapshot, table, columns, ctx.output)?);
    Ok(())
}

/// The whole snapshot, or one named table optionally narrowed to `columns`.
pub fn render(
    snapshot: &Snapshot,
    table: Option<&str>,
    columns: &[String],
    format: OutputFormat,
) -> Result<String> {
    let Some(name) = table else {
        return format_snapshot(snapshot, format);
    };
    format_table(&select_table(snapshot, name, columns)?, format)
}

fn select_table(snapshot: &Snapshot, name: &str, columns: &[String]) -> Result<Table> {
    let found = if columns.is_empty() {
        snapshot.table(name)
    } else {
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        snapshot.project_table(name, &columns)?
    };

    found.ok_or_else(|| {
        let known: Vec<String> = snapshot.tables().into_iter().map(|t| t.name).collect();
        anyhow!("Unknown table '{name}'. Available: {}", known.join(", "))
    })
}
