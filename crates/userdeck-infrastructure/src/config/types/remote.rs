//! Remote document store configuration

use serde::{Deserialize, Serialize};
use userdeck_domain::constants::USERS_COLLECTION;
use userdeck_providers::constants::REMOTE_DEFAULT_TIMEOUT_SECS;

/// Remote document store configuration
///
/// Only read when the active profile binds the remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStoreConfig {
    /// Root URL of the document store
    pub base_url: Option<String>,

    /// Collection holding the users
    pub collection: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Bearer token sent with every request
    pub api_key: Option<String>,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            collection: USERS_COLLECTION.to_string(),
            timeout_secs: REMOTE_DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}
