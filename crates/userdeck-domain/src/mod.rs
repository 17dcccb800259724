//! # Userdeck Domain Layer
//!
//! Core types shared by every other layer: the [`User`] entity, the
//! [`UserRepository`] port and the domain [`Error`] taxonomy.
//!
//! ## Architecture
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | Immutable domain values (`User`) |
//! | [`ports`] | Capability traits implemented by providers |
//! | [`error`] | Error enum and `Result` alias |
//! | [`constants`] | Domain rules (adult age, default collection) |
//!
//! The domain layer has no knowledge of providers, configuration or the
//! runtime. Providers implement the ports; the infrastructure layer decides
//! which implementation is bound.

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;

pub use entities::User;
pub use error::{Error, Result};
pub use ports::UserRepository;
