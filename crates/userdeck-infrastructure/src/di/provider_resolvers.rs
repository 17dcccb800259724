//! Provider Resolvers - linkme registry access
//!
//! ```text
//! AppConfig → Resolver → linkme registry → Arc<dyn UserRepository>
//! ```

use crate::config::AppConfig;
use std::sync::Arc;
use userdeck_application::ports::registry::{
    UserRepositoryConfig, list_user_repositories, resolve_user_repository,
};
use userdeck_domain::error::{Error, Result};
use userdeck_domain::ports::SharedUserRepository;

/// Resolver for user repository providers
///
/// Builds a registry config from the application config and looks the
/// implementation up by name.
pub struct UserRepositoryResolver {
    config: Arc<AppConfig>,
}

impl UserRepositoryResolver {
    /// Create a new resolver with config
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Registry config for `provider` built from the remote settings
    pub fn registry_config(&self, provider: &str) -> UserRepositoryConfig {
        let remote = &self.config.remote;
        let mut registry_config = UserRepositoryConfig::new(provider)
            .with_collection(remote.collection.clone())
            .with_timeout_secs(remote.timeout_secs);
        if let Some(base_url) = &remote.base_url {
            registry_config = registry_config.with_base_url(base_url.clone());
        }
        if let Some(api_key) = &remote.api_key {
            registry_config = registry_config.with_api_key(api_key.clone());
        }
        registry_config
    }

    /// Create a new instance of `provider`
    pub fn resolve(&self, provider: &str) -> Result<SharedUserRepository> {
        resolve_user_repository(&self.registry_config(provider))
            .map_err(|e| Error::configuration(format!("UserRepository: {e}")))
    }

    /// Whether `provider` is registered
    pub fn is_registered(&self, provider: &str) -> bool {
        self.list_available().iter().any(|(name, _)| *name == provider)
    }

    /// List available repository providers
    pub fn list_available(&self) -> Vec<(&'static str, &'static str)> {
        list_user_repositories()
    }
}

impl std::fmt::Debug for UserRepositoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryResolver").finish()
    }
}
