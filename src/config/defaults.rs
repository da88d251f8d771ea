//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default service configuration file.
pub const CONFIG_FILE: &str = "service_config.json";

/// Default secrets file.
pub const SECRETS_FILE: &str = "secrets.json";

/// Default state file.
pub const IP_STORE_FILE: &str = "ip_store.json";

/// Default log level name.
pub const LOG_LEVEL: &str = "INFO";

/// Default log directory.
pub const LOG_DIRECTORY: &str = ".";

/// Default check interval in seconds.
pub const CHECK_INTERVAL_SECS: i64 = 3600;

/// Default repost interval in seconds; zero or less disables reposting.
pub const REPOST_INTERVAL_SECS: i64 = -1;

/// Default per-request webhook timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
