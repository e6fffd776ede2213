//! Shared test utilities for splunkd-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the mock splunkd endpoints a full poll walks through.
//!
//! Invariants / Assumptions:
//! - Every command reads its config file from a per-test temp directory.
//! - Mock servers speak plain HTTP, so commands run with `SPLUNKD_SCHEME=http`.

use std::path::Path;

use assert_cmd::Command;
use wiremock::matchers::{method, path};

#[allow(unused_imports)]
pub use splunkd_client::testing::load_fixture;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `splunkd-cli` command whose config file lives at `config`.
pub fn splunkd_cmd(config: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunkd-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SPLUNKD_CONFIG_PATH", config);
    cmd.env("SPLUNKD_SCHEME", "http");
    cmd.env("SPLUNKD_MAX_RETRIES", "0");

    // Clear potential host leakage
    cmd.env_remove("SPLUNKD_ADDRESS")
        .env_remove("SPLUNKD_USERNAME")
        .env_remove("SPLUNKD_PASSWORD")
        .env_remove("SPLUNKD_POLL_INTERVAL")
        .env_remove("SPLUNKD_TIMEOUT")
        .env_remove("SPLUNKD_SKIP_VERIFY")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("RUST_LOG");

    cmd.arg("--quiet");
    cmd
}

/// A command aimed at `server` with the default credentials.
#[allow(dead_code)]
pub fn cmd_for(server: &MockServer, config: &Path) -> Command {
    let mut cmd = splunkd_cmd(config);
    cmd.args(["--address", &format!("127.0.0.1:{}", server.address().port())]);
    cmd
}

#[allow(dead_code)]
pub async fn mount_fixture(server: &MockServer, verb: &str, route: &str, fixture: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_text(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Login, instance info and the liveness probe.
#[allow(dead_code)]
pub async fn mount_session(server: &MockServer) {
    mount_fixture(server, "POST", "/services/auth/login", "auth/login.json").await;
    mount_fixture(server, "GET", "/services/server/info", "server/info.json").await;
    mount_fixture(server, "GET", "/services/server/settings", "server/settings.json").await;
}

/// Everything a standalone instance answers during a poll.
#[allow(dead_code)]
pub async fn mount_poll(server: &MockServer) {
    const DEPLOYMENT_PROPS: &str =
        "/services/properties/deploymentclient/target-broker:deploymentServer";

    mount_session(server).await;
    mount_fixture(server, "GET", "/services/messages", "messages/list.json").await;
    mount_fixture(server, "GET", "/services/properties", "properties/list.json").await;
    mount_text(server, &format!("{DEPLOYMENT_PROPS}/disabled"), "1\n").await;
    mount_fixture(server, "GET", "/services/admin/inputstatus", "inputs/inputstatus.json").await;
    mount_fixture(server, "GET", "/services/apps/local", "apps/list.json").await;
}
