//! # Userdeck
//!
//! A user directory built from small, swappable layers:
//!
//! - `domain` - the `User` entity, the `UserRepository` port and errors
//! - `application` - observable state, derived views and the overview view-model
//! - `providers` - in-memory and remote repository implementations
//! - `infrastructure` - configuration, logging and the composition root
//! - [`cli`] - the `userdeck` command line
//!
//! ## Example
//!
//! ```ignore
//! use userdeck::infrastructure::{AppConfig, Profile, init_app};
//!
//! let context = init_app(AppConfig::for_profile(Profile::Test)).await?;
//! let view_model = context.overview_view_model()?;
//! view_model.fetch_users().await?;
//! println!("{:?}", view_model.adults().current());
//! ```

/// Domain layer - entities, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use userdeck_domain::*;
}

/// Application layer - state containers and view-models
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use userdeck_application::*;
}

/// Providers - repository implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use userdeck_providers::*;
}

/// Infrastructure layer - config, logging and DI
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use userdeck_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::{Error, Result, User, UserRepository};

// Re-export main entry point at the crate root
pub use cli::{Cli, Command, run};
