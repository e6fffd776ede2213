//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the splunkd client against a wiremock splunkd.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Mock servers speak plain HTTP; sessions are opened with `Scheme::Http` and no retries
//! - Unmatched requests answer 404, which optional lookups treat as absent
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use secrecy::SecretString;
use splunkd_config::Scheme;

#[allow(unused_imports)]
pub use splunkd_client::testing::load_fixture;

#[allow(unused_imports)]
pub use splunkd_client::{
    ClientError, ConnectOptions, Credentials, FailureKind, Session, SessionState,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{method, path};

#[allow(dead_code)]
pub const SESSION_KEY: &str = "test-session-key";

pub fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string().into())
}

/// Credentials pointing at `server`.
pub fn credentials(server: &MockServer) -> Credentials {
    let addr = server.address();
    Credentials::new(addr.ip().to_string(), addr.port(), "admin", secret("changeme"))
}

pub fn options() -> ConnectOptions {
    ConnectOptions::new()
        .with_scheme(Scheme::Http)
        .with_max_retries(0)
}

/// Serve `fixture` for `verb path`.
#[allow(dead_code)]
pub async fn mount_fixture(server: &MockServer, verb: &str, route: &str, fixture: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}

/// Serve a plain-text body for `GET path`.
#[allow(dead_code)]
pub async fn mount_text(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_login(server: &MockServer) {
    mount_fixture(server, "POST", "/services/auth/login", "auth/login.json").await;
}

/// Login plus the given instance-info fixture.
pub async fn mount_connect(server: &MockServer, info_fixture: &str) {
    mount_login(server).await;
    mount_fixture(server, "GET", "/services/server/info", info_fixture).await;
}

/// Everything a liveness probe needs.
#[allow(dead_code)]
pub async fn mount_settings(server: &MockServer) {
    mount_fixture(server, "GET", "/services/server/settings", "server/settings.json").await;
}

/// Connect to a standalone instance served by `server`.
#[allow(dead_code)]
pub async fn connect_standalone(server: &MockServer) -> Session {
    mount_connect(server, "server/info.json").await;
    Session::connect(credentials(server), options())
        .await
        .expect("connect to mock splunkd")
}
