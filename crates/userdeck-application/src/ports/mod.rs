//! Application Ports
//!
//! - **registry** - name → factory lookup for repository providers

/// Provider registry
pub mod registry;

pub use registry::{
    USER_REPOSITORIES, UserRepositoryConfig, UserRepositoryEntry, list_user_repositories,
    resolve_user_repository,
};
