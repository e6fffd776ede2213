//! Snapshot poller tests.
//!
//! This module tests full poll cycles against a mock splunkd:
//! - Step order and observer notifications
//! - Role gating of indexer cluster and search head cluster steps
//! - Absent optional data (404) versus fatal step failures
//!
//! # Invariants
//! - A failed poll yields no snapshot and leaves the session torn down
//! - Gated steps run only for the roles that enable them

mod common;

use common::*;
use splunkd_client::{DeploymentServer, PollStep, TcpKind};
use wiremock::matchers::{method, path};

const DEPLOYMENT_PROPS: &str =
    "/services/properties/deploymentclient/target-broker:deploymentServer";

/// Steps 2 through 6, which every instance answers.
async fn mount_common_steps(server: &MockServer) {
    mount_settings(server).await;
    mount_fixture(server, "GET", "/services/messages", "messages/list.json").await;
    mount_fixture(server, "GET", "/services/properties", "properties/list.json").await;
    mount_text(server, &format!("{DEPLOYMENT_PROPS}/disabled"), "0\n").await;
    mount_text(server, &format!("{DEPLOYMENT_PROPS}/targetUri"), "https://ds01:8089\n").await;
    mount_fixture(server, "GET", "/services/admin/inputstatus", "inputs/inputstatus.json").await;
    mount_fixture(server, "GET", "/services/apps/local", "apps/list.json").await;
}

async fn mount_cluster_master_steps(server: &MockServer) {
    mount_fixture(server, "GET", "/services/cluster/config", "cluster/config.json").await;
    mount_fixture(server, "GET", "/services/cluster/master/info", "cluster/master_info.json").await;
    mount_fixture(
        server,
        "GET",
        "/services/cluster/master/generation/master",
        "cluster/generation.json",
    )
    .await;
    mount_fixture(server, "GET", "/services/cluster/master/peers", "cluster/peers.json").await;
    mount_fixture(server, "GET", "/services/cluster/master/indexes", "cluster/indexes.json").await;
    mount_fixture(
        server,
        "GET",
        "/services/cluster/master/searchheads",
        "cluster/searchheads.json",
    )
    .await;
}

#[tokio::test]
async fn test_poll_standalone_instance() {
    let server = MockServer::start().await;
    mount_common_steps(&server).await;
    let mut session = connect_standalone(&server).await;

    let mut steps: Vec<PollStep> = Vec::new();
    let snapshot = session.poll(&mut |step: PollStep| steps.push(step)).await.unwrap();

    assert_eq!(
        steps,
        vec![
            PollStep::ServiceInfo,
            PollStep::ServiceSettings,
            PollStep::Messages,
            PollStep::Configurations,
            PollStep::InputStatus,
            PollStep::Apps,
            PollStep::ClusterMasterInfo,
            PollStep::Introspection,
        ]
    );
    assert_eq!(session.state(), SessionState::Connected);

    assert_eq!(snapshot.identity.server_name, "idx01");
    assert_eq!(snapshot.settings.splunk_home, "/opt/splunk");
    assert_eq!(snapshot.settings.web_port, 8000);
    assert!(snapshot.settings.web_ssl);

    assert!(snapshot.restart_required);
    let titles: Vec<&str> = snapshot.messages.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["license_warning", "restart_required"]);

    assert_eq!(
        snapshot.configuration_files,
        vec!["deploymentclient", "inputs", "server"]
    );
    assert_eq!(
        snapshot.deployment_server,
        DeploymentServer::Uri("https://ds01:8089".to_string())
    );

    let kinds: Vec<TcpKind> = snapshot.inputs.tcp_listeners.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TcpKind::Raw, TcpKind::Cooked]);
    assert_eq!(snapshot.inputs.tcp_listeners[0].port, "514");
    assert_eq!(snapshot.inputs.tcp_listeners[1].source, "fwd01");
    assert_eq!(snapshot.inputs.file_monitors.len(), 1);
    assert_eq!(snapshot.inputs.udp_hosts.len(), 1);

    assert_eq!(snapshot.apps.len(), 2);
    assert!(snapshot.apps.iter().any(|a| a.name == "legacy" && a.disabled));

    // Nothing clustered and no introspection endpoints: all absent, none fatal.
    assert_eq!(snapshot.cluster.mode, None);
    assert!(snapshot.cluster.master_uris.is_empty());
    assert!(snapshot.indexer_cluster.is_none());
    assert!(snapshot.search_head_cluster.is_none());
    assert!(snapshot.cluster_aggregates().is_none());
    assert!(snapshot.resources.hostwide.is_none());
    assert!(snapshot.resources.partitions.is_empty());
}

#[tokio::test]
async fn test_poll_cluster_master_collects_cluster_facts() {
    let server = MockServer::start().await;
    mount_common_steps(&server).await;
    mount_cluster_master_steps(&server).await;
    mount_connect(&server, "server/info_cluster_master.json").await;
    let mut session = Session::connect(credentials(&server), options()).await.unwrap();

    let snapshot = session.poll(&mut ()).await.unwrap();

    assert_eq!(snapshot.cluster.mode.as_deref(), Some("master"));
    let facts = snapshot.indexer_cluster.as_ref().expect("cluster facts");
    assert_eq!(facts.peers.len(), 2);
    assert_eq!(facts.peers[0].guid, "PEER-GUID-1");
    assert!(facts.all_data_searchable);
    assert!(facts.search_factor_met);
    assert!(facts.initialized);
    assert!(!facts.rolling_restart);

    let aggregates = snapshot.cluster_aggregates().unwrap();
    assert_eq!(aggregates.peers_searchable, 1);
    assert_eq!(aggregates.peers_not_searchable, 1);
    assert_eq!(aggregates.indexes_searchable, 1);
    assert_eq!(aggregates.peers_up.to_string(), "1/2");
    assert_eq!(aggregates.search_heads_connected.to_string(), "1/2");

    let names: Vec<String> = snapshot.tables().into_iter().map(|t| t.name).collect();
    assert!(names.contains(&"cluster_peers".to_string()));
    assert!(!names.contains(&"shc_members".to_string()));
    let indexes = snapshot.table("cluster_indexes").unwrap();
    assert_eq!(indexes.rows[0][4], "1 (100%)");
}

#[tokio::test]
async fn test_poll_resolves_clustermaster_references() {
    let server = MockServer::start().await;
    mount_common_steps(&server).await;
    mount_text(
        &server,
        "/services/properties/server/clustering/master_uri",
        "clustermaster:east, https://cm02:8089",
    )
    .await;
    mount_text(
        &server,
        "/services/properties/server/clustermaster:east/master_uri",
        "https://cm01:8089",
    )
    .await;
    mount_text(
        &server,
        "/services/properties/server/shclustering/conf_deploy_fetch_url",
        "https://deployer01:8089",
    )
    .await;
    let mut session = connect_standalone(&server).await;

    let snapshot = session.poll(&mut ()).await.unwrap();

    assert_eq!(snapshot.cluster.master_uris, vec!["cm01:8089", "cm02:8089"]);
    assert_eq!(snapshot.cluster.shc_deployer.as_deref(), Some("deployer01:8089"));
}

#[tokio::test]
async fn test_poll_shc_member_collects_captain_and_members() {
    let server = MockServer::start().await;
    mount_common_steps(&server).await;
    mount_fixture(&server, "GET", "/services/shcluster/status", "shcluster/status.json").await;
    mount_fixture(
        &server,
        "GET",
        "/services/shcluster/member/members",
        "shcluster/members.json",
    )
    .await;
    mount_fixture(
        &server,
        "GET",
        "/services/server/status/resource-usage/hostwide",
        "introspection/hostwide.json",
    )
    .await;
    mount_connect(&server, "server/info_shc_member.json").await;
    let mut session = Session::connect(credentials(&server), options()).await.unwrap();

    let mut steps: Vec<PollStep> = Vec::new();
    let snapshot = session.poll(&mut |step: PollStep| steps.push(step)).await.unwrap();

    assert!(steps.contains(&PollStep::SearchHeadClusterInfo));
    assert!(snapshot.identity.is_windows());
    let shc = snapshot.search_head_cluster.as_ref().expect("shc facts");
    assert_eq!(shc.members.len(), 2);
    let captain = shc.captain.as_ref().unwrap();
    assert_eq!(captain.label, "sh01");
    assert!(captain.dynamic_captain);
    assert!(snapshot.indexer_cluster.is_none());

    let usage = snapshot.resources.hostwide.as_ref().unwrap();
    assert_eq!(usage.cpu_pct(), Some(25));
    assert_eq!(usage.mem_pct(), Some(50));
    assert_eq!(usage.swap_pct(), None);
}

#[tokio::test]
async fn test_poll_step_failure_tears_session_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/apps/local"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_common_steps(&server).await;
    let mut session = connect_standalone(&server).await;

    let mut steps: Vec<PollStep> = Vec::new();
    let err = session.poll(&mut |step: PollStep| steps.push(step)).await.unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 500, .. }));
    assert_eq!(steps.last(), Some(&PollStep::Apps));
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!session.is_connected());

    let err = session.poll(&mut ()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));
}

#[tokio::test]
async fn test_poll_missing_required_endpoint_is_fatal() {
    let server = MockServer::start().await;
    mount_settings(&server).await;
    let mut session = connect_standalone(&server).await;

    // `/services/messages` is not mounted: 404 on a required step.
    let err = session.poll(&mut ()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(session.state(), SessionState::Disconnected);
}

#[tokio::test]
async fn test_poll_expired_session_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/server/settings"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let mut session = connect_standalone(&server).await;

    let err = session.poll(&mut ()).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Authentication);
    assert!(!session.is_connected());
}

#[tokio::test]
async fn test_snapshot_project_table_reaches_non_default_fields() {
    let server = MockServer::start().await;
    mount_common_steps(&server).await;
    let mut session = connect_standalone(&server).await;
    let snapshot = session.poll(&mut ()).await.unwrap();

    let apps = snapshot
        .project_table("apps", &["description", "name"])
        .unwrap()
        .expect("apps table");
    assert_eq!(apps.columns, vec!["description", "name"]);
    assert_eq!(apps.len(), snapshot.apps.len());

    let err = snapshot.project_table("apps", &["nope"]).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Validation);

    // Role-gated and unknown tables are simply absent.
    assert!(snapshot.project_table("cluster_peers", &["name"]).unwrap().is_none());
    assert!(snapshot.project_table("bogus", &["name"]).unwrap().is_none());
}
