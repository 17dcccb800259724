//! In-memory user repository
//!
//! Stores users in a concurrent hash map. Data is not persisted and is lost
//! when the repository is dropped. Bound by the test profile.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;
use userdeck_domain::entities::{User, validate_user_id};
use userdeck_domain::error::Result;
use userdeck_domain::ports::UserRepository;

/// In-memory user repository
///
/// Safe to share between concurrent callers. Re-adding a user under an
/// existing id replaces the previous value.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    storage: Arc<DashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with `users`
    pub fn from_users<I, K>(users: I) -> Self
    where
        I: IntoIterator<Item = (K, User)>,
        K: Into<String>,
    {
        let repository = Self::new();
        for (id, user) in users {
            repository.storage.insert(id.into(), user);
        }
        repository
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether no user is stored
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl std::fmt::Debug for InMemoryUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserRepository")
            .field("users", &self.storage.len())
            .finish()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        validate_user_id(id)?;
        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }

    async fn add_user(&self, id: &str, user: User) -> Result<()> {
        validate_user_id(id)?;
        if self.storage.insert(id.to_string(), user).is_some() {
            debug!(id, "replaced stored user");
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut entries: Vec<(String, User)> = self
            .storage
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries.into_iter().map(|(_, user)| user).collect())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use userdeck_application::ports::registry::{
    USER_REPOSITORIES, UserRepositoryConfig, UserRepositoryEntry,
};

/// Factory function for creating in-memory repository instances.
fn memory_factory(
    _config: &UserRepositoryConfig,
) -> std::result::Result<Arc<dyn UserRepository>, String> {
    Ok(Arc::new(InMemoryUserRepository::new()))
}

#[linkme::distributed_slice(USER_REPOSITORIES)]
static MEMORY_REPOSITORY: UserRepositoryEntry = UserRepositoryEntry {
    name: "memory",
    description: "In-memory map, for tests and local runs",
    factory: memory_factory,
};
