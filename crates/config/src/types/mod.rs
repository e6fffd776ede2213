//! Configuration types for splunkd-monitor.

pub mod connection;
pub mod monitor;

pub use connection::{ConnectionConfig, Scheme};
pub use monitor::{DefaultLogin, LoginDetails, MonitorConfig, SavedHost, normalize_address};
