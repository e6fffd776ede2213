//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and the JSON config file.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Writing configuration back to disk (see `persistence`).
//!
//! Invariants / Assumptions:
//! - Precedence: builder overrides > environment > config file > built-in defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ConfigLoader;
pub use env::{
    ENV_ADDRESS, ENV_CONFIG_PATH, ENV_MAX_RETRIES, ENV_PASSWORD, ENV_POLL_INTERVAL, ENV_SCHEME,
    ENV_SKIP_VERIFY, ENV_TIMEOUT, ENV_USERNAME, env_var_or_none,
};
pub use error::ConfigError;
