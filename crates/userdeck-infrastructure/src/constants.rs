//! Infrastructure layer constants
//!
//! Domain rules live in `userdeck_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "userdeck.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "userdeck";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "USERDECK";

/// Separator between nested keys in environment variables
/// (e.g. `USERDECK_REMOTE__BASE_URL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "USERDECK_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "userdeck";

// ============================================================================
// DI CONSTANTS
// ============================================================================

/// Capability name of the user repository port
pub const CAPABILITY_USER_REPOSITORY: &str = "UserRepository";

/// Capability name of the overview view-model
pub const CAPABILITY_OVERVIEW_VIEW_MODEL: &str = "OverviewViewModel";

/// Registry name of the remote repository provider
pub const PROVIDER_REMOTE: &str = "remote";

/// Registry name of the in-memory repository provider
pub const PROVIDER_MEMORY: &str = "memory";
