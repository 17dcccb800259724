//! Main application configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use userdeck_application::state::DEFAULT_CHANNEL_CAPACITY;
use userdeck_domain::error::Error;

use super::{LoggingConfig, RemoteStoreConfig};

/// Named binding configuration
///
/// Selects which implementation backs each capability. Consumers never see
/// the profile, only the capability they asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Remote document store
    #[default]
    Production,
    /// In-memory store
    Test,
}

impl Profile {
    /// Lowercase name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(Error::configuration(format!(
                "Unknown profile '{other}'. Use production or test"
            ))),
        }
    }
}

/// Observable state configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Buffered snapshots per change stream before slow readers lag
    pub channel_capacity: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Active binding profile
    pub profile: Profile,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Remote document store configuration
    pub remote: RemoteStoreConfig,

    /// Observable state configuration
    pub state: StateConfig,
}

impl AppConfig {
    /// Default configuration with the given profile
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }
}
