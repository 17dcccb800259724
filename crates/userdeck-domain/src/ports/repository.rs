//! User Repository Port
//!
//! Interface for storing and retrieving users, regardless of whether the
//! backing store lives in memory or behind a network call.

use crate::entities::User;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a bound repository
pub type SharedUserRepository = Arc<dyn UserRepository>;

/// Repository: User Persistence
///
/// Every method may suspend. The in-memory provider never fails apart from
/// argument validation; remote providers report `NotFound` and `Transport`
/// errors.
///
/// # Example
///
/// ```ignore
/// use userdeck_domain::{User, UserRepository};
///
/// repo.add_user("u1", User::new("Midna", 21)).await?;
/// let user = repo.get_user("u1").await?;
/// assert_eq!(user, Some(User::new("Midna", 21)));
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id
    ///
    /// # Returns
    /// `Ok(None)` when no user is stored under `id`
    async fn get_user(&self, id: &str) -> Result<Option<User>>;

    /// Store a user under `id`, replacing any previous value
    async fn add_user(&self, id: &str, user: User) -> Result<()>;

    /// List every stored user, ordered by id
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Name of the implementation, for diagnostics
    fn provider_name(&self) -> &str;
}
