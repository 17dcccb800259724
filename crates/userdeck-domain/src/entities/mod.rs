//! Domain Entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`User`] | A named person with an age |

/// User entity and identifier rules
pub mod user;

pub use user::{User, validate_user_id};
