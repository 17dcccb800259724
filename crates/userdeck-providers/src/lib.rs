//! # Userdeck - Provider Implementations
//!
//! Implementations of the `UserRepository` port defined in `userdeck-domain`.
//!
//! ## Providers
//!
//! | Name | Type | Use |
//! |------|------|-----|
//! | `memory` | [`InMemoryUserRepository`] | Tests and local runs |
//! | `remote` | [`RemoteUserRepository`] | Production, backed by a document store |
//!
//! Each provider registers itself in the application-layer registry, so the
//! infrastructure layer only needs to link this crate.
//!
//! ## Usage
//!
//! ```ignore
//! use userdeck_providers::repository::InMemoryUserRepository;
//! use userdeck_providers::repository::RemoteUserRepository;
//! ```

// Re-export domain types commonly used with providers
pub use userdeck_domain::error::{Error, Result};
pub use userdeck_domain::ports::UserRepository;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// User repository implementations
pub mod repository;

pub use repository::{InMemoryUserRepository, RemoteUserRepository};
