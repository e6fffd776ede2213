//! Monitoring core for a remote splunkd instance.
//!
//! Opens an authenticated [`Session`], polls it into a [`Snapshot`], derives
//! cluster aggregates, runs ad-hoc REST queries and performs a handful of
//! administrative operations (restart, deployment client, configuration
//! refresh and dump).
//!
//! Every network operation takes `&mut Session`; a session that hits an
//! authentication or transport failure is torn down and stays unusable.

pub mod adhoc;
pub mod aggregate;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod metrics;
mod metrics_exporter;
pub mod models;
pub mod operations;
pub mod poller;
pub mod render;
mod serde_helpers;
pub mod session;
pub mod snapshot;
mod telemetry;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use adhoc::{HttpMethod, RestResponse, merge_params, parse_uri};
pub use aggregate::{ClusterAggregates, Ratio};
pub use error::{ClientError, FailureKind, Result};
pub use metrics::MetricsCollector;
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    App, ClusterIndex, ClusterMembership, ClusterPeer, ClusterSearchHead, DeploymentServer,
    DiskPartition, FileMonitor, HealthMessage, IndexerClusterFacts, InputStatus,
    InstanceIdentity, PrimaryRole, ProcessInput, ResourceUsage, RoleSet, ServerSettings,
    ShcCaptain, ShcFacts, ShcMember, SplunkProcess, TcpKind, TcpListener, UdpHost,
};
pub use operations::{ReloadOutcome, ReloadReport};
pub use poller::{PollObserver, PollStep};
pub use render::{Record, Table, project};
pub use session::{Credentials, Session, SessionState};
pub use snapshot::Snapshot;
pub use telemetry::{TracingConfig, TracingError, TracingGuard};
pub use transport::{ConnectOptions, Transport};
