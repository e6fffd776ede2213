//! Snapshot polling.
//!
//! Responsibilities:
//! - Running the fixed, ordered sequence of poll steps against a live session
//! - Gating cluster and SHC steps on the instance's roles
//! - Reporting progress to a [`PollObserver`] before each step
//!
//! Does NOT handle:
//! - Scheduling repeated polls (the CLI `watch` command does that)
//!
//! Invariants:
//! - Any step failure aborts the poll, tears the session down and yields no snapshot
//! - Steps run strictly in [`PollStep::ALL`] order; gated steps that do not apply are skipped
//!   without notifying the observer

use std::fmt;
use std::future::Future;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::InstanceIdentity;
use crate::session::{Session, SessionState};
use crate::snapshot::Snapshot;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PollStep {
    ServiceInfo,
    ServiceSettings,
    Messages,
    Configurations,
    InputStatus,
    Apps,
    ClusterMasterInfo,
    SearchHeadClusterInfo,
    Introspection,
}

impl PollStep {
    pub const ALL: [PollStep; 9] = [
        Self::ServiceInfo,
        Self::ServiceSettings,
        Self::Messages,
        Self::Configurations,
        Self::InputStatus,
        Self::Apps,
        Self::ClusterMasterInfo,
        Self::SearchHeadClusterInfo,
        Self::Introspection,
    ];

    /// Metric label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceInfo => "service_info",
            Self::ServiceSettings => "service_settings",
            Self::Messages => "messages",
            Self::Configurations => "configurations",
            Self::InputStatus => "input_status",
            Self::Apps => "apps",
            Self::ClusterMasterInfo => "cluster_master_info",
            Self::SearchHeadClusterInfo => "search_head_cluster_info",
            Self::Introspection => "introspection",
        }
    }

    /// Progress text shown while the step runs.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ServiceInfo => "Polling service info...",
            Self::ServiceSettings => "Polling service settings...",
            Self::Messages => "Polling messages...",
            Self::Configurations => "Polling configurations...",
            Self::InputStatus => "Polling input status...",
            Self::Apps => "Polling apps...",
            Self::ClusterMasterInfo => "Polling cluster master info...",
            Self::SearchHeadClusterInfo => "Polling search head cluster info...",
            Self::Introspection => "Polling introspection...",
        }
    }

    /// 1-based position in the poll sequence.
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }
}

impl fmt::Display for PollStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives progress notifications during a poll.
pub trait PollObserver {
    fn on_step(&mut self, _step: PollStep) {}
}

/// No progress reporting.
impl PollObserver for () {}

impl<F: FnMut(PollStep)> PollObserver for F {
    fn on_step(&mut self, step: PollStep) {
        self(step)
    }
}

struct StepRunner<'a, O: ?Sized> {
    observer: &'a mut O,
    metrics: Option<&'a MetricsCollector>,
}

impl<O: PollObserver + ?Sized> StepRunner<'_, O> {
    async fn run<T>(&mut self, step: PollStep, work: impl Future<Output = Result<T>>) -> Result<T> {
        self.observer.on_step(step);
        debug!(step = step.as_str(), "Running poll step");
        let started = Instant::now();
        let result = work.await;
        if let Some(m) = self.metrics {
            m.record_poll_step(step.as_str(), started.elapsed());
        }
        result
    }
}

async fn collect<O: PollObserver + ?Sized>(
    transport: &Transport,
    runner: &mut StepRunner<'_, O>,
) -> Result<Snapshot> {
    let info = runner
        .run(PollStep::ServiceInfo, endpoints::get_server_info(transport))
        .await?;
    let identity = InstanceIdentity::from(info);

    let settings = runner
        .run(PollStep::ServiceSettings, endpoints::get_server_settings(transport))
        .await?;

    let messages = runner
        .run(PollStep::Messages, endpoints::list_messages(transport))
        .await?;
    let restart_required = messages.iter().any(|m| m.is_restart_required());

    let (configuration_files, deployment_server) = runner
        .run(PollStep::Configurations, async {
            let files = endpoints::list_configuration_files(transport).await?;
            let deployment = endpoints::get_deployment_server(transport).await?;
            Ok::<_, ClientError>((files, deployment))
        })
        .await?;

    let inputs = runner
        .run(PollStep::InputStatus, endpoints::get_input_status(transport))
        .await?;

    let apps = runner
        .run(PollStep::Apps, endpoints::list_apps(transport))
        .await?;

    let is_cluster_master = identity.roles.is_cluster_master();
    let (cluster, indexer_cluster) = runner
        .run(PollStep::ClusterMasterInfo, async {
            let membership = endpoints::get_cluster_membership(transport).await?;
            let facts = if is_cluster_master {
                Some(endpoints::get_indexer_cluster_facts(transport).await?)
            } else {
                None
            };
            Ok::<_, ClientError>((membership, facts))
        })
        .await?;

    let search_head_cluster = if identity.roles.is_shc_member() {
        Some(
            runner
                .run(PollStep::SearchHeadClusterInfo, endpoints::get_shc_facts(transport))
                .await?,
        )
    } else {
        None
    };

    let resources = runner
        .run(PollStep::Introspection, endpoints::get_resource_usage(transport))
        .await?;

    Ok(Snapshot {
        polled_at: Utc::now(),
        identity,
        settings,
        restart_required,
        deployment_server,
        cluster,
        messages,
        configuration_files,
        inputs,
        apps,
        indexer_cluster,
        search_head_cluster,
        resources,
    })
}

impl Session {
    /// Collect a full snapshot.
    ///
    /// The session is `Polling` while this runs and `Connected` afterwards. The
    /// freshly read instance info replaces the identity resolved at connect.
    ///
    /// # Errors
    ///
    /// `NotConnected` when the session is already torn down. Any step failure
    /// tears the session down and is returned unchanged.
    pub async fn poll<O: PollObserver + ?Sized>(&mut self, observer: &mut O) -> Result<Snapshot> {
        self.transport()?;
        self.set_state(SessionState::Polling);

        let started = Instant::now();
        let result = {
            let transport = self.transport()?;
            let mut runner = StepRunner {
                observer,
                metrics: self.metrics(),
            };
            collect(transport, &mut runner).await
        };

        let success = result.is_ok();
        if let Some(m) = self.metrics() {
            m.record_poll(started.elapsed(), success);
        }

        match result {
            Ok(snapshot) => {
                self.set_identity(snapshot.identity.clone());
                self.set_state(SessionState::Connected);
                info!(
                    address = %self.credentials().address(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Poll complete"
                );
                Ok(snapshot)
            }
            Err(e) => {
                self.teardown(&e);
                Err(e)
            }
        }
    }
}
