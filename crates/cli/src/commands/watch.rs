//! Repeated polling until interrupted.
//!
//! Responsibilities:
//! - Run the poll loop on a spawned task that owns the session.
//! - Report progress and results back to the rendering loop over a channel.
//!
//! Invariants:
//! - The first failed poll ends the loop, since the session is torn down with it.
//! - Ctrl+C stops rendering and exits with the interrupt code.

use std::time::Duration;

use anyhow::Result;
use splunkd_client::{ClientError, PollStep, Session, Snapshot};
use tokio::sync::mpsc;

use crate::commands::{CommandContext, poll};
use crate::error::Cancelled;
use crate::progress::{Spinner, step_label};

/// Messages from the polling task.
#[derive(Debug)]
pub enum PollEvent {
    Step(PollStep),
    Snapshot(Box<Snapshot>),
    Failed(ClientError),
}

pub async fn run(ctx: &CommandContext, interval: Option<u64>, table: Option<String>) -> Result<()> {
    let interval = Duration::from_secs(interval.unwrap_or(ctx.config.poll_interval_secs).max(1));
    let session = ctx.open_session().await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = tokio::spawn(poll_loop(session, interval, tx));

    let result = tokio::select! {
        result = render_loop(ctx, &mut rx, table.as_deref()) => result,
        _ = tokio::signal::ctrl_c() => Err(Cancelled.into()),
    };
    poller.abort();
    result
}

async fn poll_loop(mut session: Session, interval: Duration, tx: mpsc::UnboundedSender<PollEvent>) {
    loop {
        let events = tx.clone();
        let mut observer = move |step: PollStep| {
            let _ = events.send(PollEvent::Step(step));
        };
        let event = match session.poll(&mut observer).await {
            Ok(snapshot) => PollEvent::Snapshot(Box::new(snapshot)),
            Err(err) => PollEvent::Failed(err),
        };
        let failed = matches!(event, PollEvent::Failed(_));
        if tx.send(event).is_err() || failed {
            return;
        }
        tokio::time::sleep(interval).await;
    }
}

async fn render_loop(
    ctx: &CommandContext,
    rx: &mut mpsc::UnboundedReceiver<PollEvent>,
    table: Option<&str>,
) -> Result<()> {
    let mut spinner: Option<Spinner> = None;

    while let Some(event) = rx.recv().await {
        match event {
            PollEvent::Step(step) => spinner
                .get_or_insert_with(|| Spinner::new(!ctx.quiet, "Polling"))
                .set_message(step_label(step)),
            PollEvent::Snapshot(snapshot) => {
                if let Some(spinner) = spinner.take() {
                    spinner.clear();
                }
                println!("{}", poll::render(&snapshot, table, &[], ctx.output)?);
                tracing::info!(polled_at = %snapshot.polled_at, "Poll rendered");
            }
            PollEvent::Failed(err) => {
                return Err(anyhow::Error::new(err).context("Poll failed"));
            }
        }
    }
    Ok(())
}
