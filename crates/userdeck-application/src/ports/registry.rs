//! User Repository Registry
//!
//! Auto-registration system for repository providers.
//! Providers register themselves via `#[linkme::distributed_slice]` and are
//! discovered at runtime by name.

use std::sync::Arc;

use userdeck_domain::ports::UserRepository;

/// Configuration for repository provider creation
///
/// Contains every option a repository provider might need.
/// Providers use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct UserRepositoryConfig {
    /// Provider name (e.g., "memory", "remote")
    pub provider: String,
    /// Base URL of the remote document store
    pub base_url: Option<String>,
    /// Collection holding the users
    pub collection: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Bearer token for the remote store
    pub api_key: Option<String>,
}

impl UserRepositoryConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the collection
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Registry entry for repository providers
///
/// Each provider registers one entry holding its name, a description and a
/// factory that builds a fresh instance from configuration.
pub struct UserRepositoryEntry {
    /// Unique provider name (e.g., "memory", "remote")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&UserRepositoryConfig) -> Result<Arc<dyn UserRepository>, String>,
}

#[linkme::distributed_slice]
pub static USER_REPOSITORIES: [UserRepositoryEntry] = [..];

/// Resolve a repository provider by name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn UserRepository>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_user_repository(
    config: &UserRepositoryConfig,
) -> Result<Arc<dyn UserRepository>, String> {
    if let Some(entry) = USER_REPOSITORIES
        .iter()
        .find(|entry| entry.name == config.provider)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = USER_REPOSITORIES.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown user repository provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered repository providers
///
/// Returns `(name, description)` pairs sorted by name.
pub fn list_user_repositories() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<_> = USER_REPOSITORIES
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    providers.sort_unstable();
    providers
}
