//! User entity

use crate::constants::ADULT_AGE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Entity: User
///
/// Immutable value compared by its fields. Callers build a new `User`
/// instead of mutating an existing one.
///
/// ## Example
///
/// ```rust
/// use userdeck_domain::User;
///
/// let user = User::new("Midna", 21);
/// assert!(user.is_adult());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
}

impl User {
    /// Create a new user
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Whether the user has reached [`ADULT_AGE`]
    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }
}

/// Validate a user identifier before it reaches a repository
///
/// The empty string is the only rejected identifier; any other string,
/// whitespace included, is a valid key.
pub fn validate_user_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::invalid_argument("User id cannot be empty"));
    }
    Ok(())
}
