//! Data models for splunkd REST API responses.
//!
//! Each submodule covers one resource group; records used in snapshot tables
//! implement [`crate::render::Record`].

mod apps;
mod cluster;
mod common;
mod deployment;
mod inputs;
mod messages;
mod resources;
mod server;
mod shc;

pub use apps::App;
pub use cluster::{
    ClusterGeneration, ClusterIndex, ClusterMasterInfo, ClusterMembership, ClusterPeer,
    ClusterSearchHead, CopyTracker, IndexerClusterFacts, format_copies, host_port_of,
};
pub use common::{Entry, Feed, MessageType, SplunkMessage, SplunkMessages};
pub use deployment::DeploymentServer;
pub use inputs::{
    FileMonitor, InputStatus, ListenerPort, ProcessInput, TcpKind, TcpListener, UdpHost,
    merge_tcp_listeners,
};
pub use messages::{HealthMessage, RESTART_REQUIRED_MESSAGE};
pub use resources::{DiskPartition, HostwideUsage, ResourceUsage, SplunkProcess};
pub use server::{InstanceIdentity, PrimaryRole, RoleSet, ServerInfo, ServerSettings};
pub use shc::{ShcCaptain, ShcFacts, ShcMember};
