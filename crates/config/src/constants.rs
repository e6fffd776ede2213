//! Centralized constants for the splunkd-monitor workspace.
//!
//! Default values used across crates, kept here so the CLI, the loader and
//! the client agree on them.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default splunkd management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Login Defaults
// =============================================================================

/// Address used when nothing else is configured.
pub const DEFAULT_ADDRESS: &str = "localhost:8089";

/// Stock splunkd administrator account.
pub const DEFAULT_USERNAME: &str = "admin";

/// Stock splunkd administrator password.
pub const DEFAULT_PASSWORD: &str = "changeme";

// =============================================================================
// Polling & Ad-hoc Defaults
// =============================================================================

/// Default interval between polls in watch mode, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Maximum allowed poll interval in seconds (1 day).
pub const MAX_POLL_INTERVAL_SECS: u64 = 86_400;

/// Preset URIs offered for ad-hoc queries.
pub const DEFAULT_ENDPOINTS: &[&str] = &["/services/server/info", "/services/server/settings"];

// =============================================================================
// File Locations
// =============================================================================

/// Directory name used under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "splunkd-monitor";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";
