//! End-to-end tests of splunkd-cli against a mock splunkd.
//!
//! These tests verify command output on stdout and the structured exit codes
//! scripts rely on.

mod common;

use common::*;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};

#[tokio::test]
async fn test_poll_json_snapshot() {
    let server = MockServer::start().await;
    mount_poll(&server).await;
    let dir = TempDir::new().unwrap();

    let output = cmd_for(&server, &dir.path().join("config.json"))
        .args(["poll", "-o", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["summary"]["server_name"], "idx01");
    assert_eq!(doc["summary"]["deployment_server"], "(disabled)");
    assert_eq!(doc["tables"]["apps"].as_array().unwrap().len(), 2);
    assert_eq!(doc["tables"]["configuration_files"][0]["name"], "deploymentclient");
    assert!(doc["tables"].get("cluster_peers").is_none());
}

#[tokio::test]
async fn test_poll_single_table_as_csv() {
    let server = MockServer::start().await;
    mount_poll(&server).await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["poll", "--table", "apps", "--columns", "name,disabled", "-o", "csv"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("name,disabled\n"))
        .stdout(predicate::str::contains("legacy,"));
}

#[tokio::test]
async fn test_poll_unknown_table_lists_available() {
    let server = MockServer::start().await;
    mount_poll(&server).await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["poll", "--table", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown table 'nope'"))
        .stderr(predicate::str::contains("tcp_listeners"));
}

#[tokio::test]
async fn test_rest_prints_plaintext_response() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("GET"))
        .and(path("/services/apps/local"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<feed/>"))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["rest", "get", "/services/apps/local?count=1", "--param", "count=5"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("HTTP 200 OK"))
        .stdout(predicate::str::contains("<feed/>"));
}

#[tokio::test]
async fn test_rest_malformed_uri_is_validation_error() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["rest", "GET", "/services/foo?bad"])
        .assert()
        .code(5);
}

#[tokio::test]
async fn test_rejected_login_is_auth_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "messages": [{"type": "WARN", "text": "Login failed"}]
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["poll"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Splunk connection reset"))
        .stderr(predicate::str::contains("Login failed"));
}

#[test]
fn test_unreachable_instance_is_connection_exit_code() {
    let dir = TempDir::new().unwrap();

    splunkd_cmd(&dir.path().join("config.json"))
        .args(["--address", "127.0.0.1:1", "poll"])
        .assert()
        .code(3);
}

#[test]
fn test_blank_password_is_validation_exit_code() {
    let dir = TempDir::new().unwrap();

    splunkd_cmd(&dir.path().join("config.json"))
        .args(["--address", "127.0.0.1:1", "--password", "", "poll"])
        .assert()
        .code(5);
}

#[tokio::test]
async fn test_restart_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("POST"))
        .and(path("/services/server/control/restart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["restart", "--yes"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Restart requested"));
}

#[tokio::test]
async fn test_unchanged_deployment_client_fails_without_restart() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_fixture(
        &server,
        "POST",
        "/services/properties/deploymentclient/target-broker:deploymentServer",
        "properties/deployment_unchanged.json",
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/services/server/control/restart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["deployment-client", "ds01:8089", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("modified 0 key"));
}

#[tokio::test]
async fn test_conf_prints_stanzas() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_fixture(
        &server,
        "GET",
        "/services/properties/server",
        "properties/server_stanzas.json",
    )
    .await;
    mount_fixture(
        &server,
        "GET",
        "/services/properties/server/general",
        "properties/server_general.json",
    )
    .await;
    mount_fixture(
        &server,
        "GET",
        "/services/properties/server/sslConfig",
        "properties/server_sslconfig.json",
    )
    .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["conf", "server"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("[general]\n"))
        .stdout(predicate::str::contains("serverName = idx01"));
}

#[tokio::test]
async fn test_rejected_deployment_client_reports_server_text() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    Mock::given(method("POST"))
        .and(path("/services/properties/deploymentclient/target-broker:deploymentServer"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "messages": [{"type": "ERROR", "text": "Invalid targetUri"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/server/control/restart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    cmd_for(&server, &dir.path().join("config.json"))
        .args(["deployment-client", "bad uri", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid targetUri"))
        .stderr(predicate::str::contains("Splunk connection reset").not());
}
