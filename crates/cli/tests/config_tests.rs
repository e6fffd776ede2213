//! Tests for configuration file and saved-host commands.

mod common;

use common::*;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};

#[test]
fn test_config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    splunkd_cmd(&config)
        .args(["config", "init"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Wrote default configuration"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(written["defaults"]["address"], "localhost:8089");
    assert_eq!(written["poll_interval_secs"], 60);

    splunkd_cmd(&config)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create"));

    splunkd_cmd(&config)
        .args(["config", "init", "--force"])
        .assert()
        .code(0);
}

#[test]
fn test_config_init_replaces_broken_file_with_force() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{ not json").unwrap();

    splunkd_cmd(&config)
        .args(["config", "init", "--force"])
        .assert()
        .code(0);
    assert!(std::fs::read_to_string(&config).unwrap().contains("defaults"));
}

#[test]
fn test_config_path_prints_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.json");

    splunkd_cmd(&config)
        .args(["config", "path"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("custom.json"));
}

#[test]
fn test_hosts_save_list_forget() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    splunkd_cmd(&config)
        .args(["-u", "ops", "-p", "hunter2", "hosts", "save", "idx01"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Saved credentials for idx01:8089"));

    splunkd_cmd(&config)
        .args(["hosts", "list"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("idx01:8089"))
        .stdout(predicate::str::contains("ops"))
        .stdout(predicate::str::contains("hunter2").not());

    splunkd_cmd(&config)
        .args(["hosts", "forget", "idx01:8089"])
        .assert()
        .code(0);

    splunkd_cmd(&config)
        .args(["hosts", "forget", "idx01:8089"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No saved host"));
}

#[test]
fn test_hosts_endpoints_lists_presets() {
    let dir = TempDir::new().unwrap();

    splunkd_cmd(&dir.path().join("config.json"))
        .args(["-o", "csv", "hosts", "endpoints"])
        .assert()
        .code(0)
        .stdout("uri\n/services/server/info\n/services/server/settings\n");
}

#[test]
fn test_invalid_poll_interval_env_is_rejected() {
    let dir = TempDir::new().unwrap();

    splunkd_cmd(&dir.path().join("config.json"))
        .env("SPLUNKD_POLL_INTERVAL", "0")
        .args(["hosts", "list"])
        .assert()
        .code(1);
}

#[tokio::test]
async fn test_saved_host_credentials_are_used_for_login() {
    let server = MockServer::start().await;
    let address = format!("127.0.0.1:{}", server.address().port());
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    splunkd_cmd(&config)
        .args(["-u", "ops", "-p", "s3cret", "hosts", "save", &address])
        .assert()
        .code(0);

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .and(body_string_contains("username=ops"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login.json")))
        .expect(1)
        .mount(&server)
        .await;
    mount_fixture(&server, "GET", "/services/server/info", "server/info.json").await;
    mount_fixture(&server, "GET", "/services/server/settings", "server/settings.json").await;
    Mock::given(method("POST"))
        .and(path("/services/server/control/restart"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    splunkd_cmd(&config)
        .args(["--address", &address, "restart", "--yes"])
        .assert()
        .code(0);
}
