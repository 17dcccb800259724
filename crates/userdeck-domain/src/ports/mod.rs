//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers. Providers
//! implement them; the composition root picks which implementation is bound.
//!
//! ## Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`UserRepository`] | Lookup and persistence of users |

/// User repository port
pub mod repository;

pub use repository::{SharedUserRepository, UserRepository};
