//! Configuration management
//!
//! Layered configuration: built-in defaults, then a TOML file, then
//! `USERDECK_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
