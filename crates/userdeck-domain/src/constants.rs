//! Domain layer constants
//!
//! Values that encode domain rules. Infrastructure-specific constants
//! (config file names, env prefixes) live in `userdeck_infrastructure::constants`.

/// Minimum age at which a user counts as an adult
pub const ADULT_AGE: u32 = 18;

/// Document store collection holding users
pub const USERS_COLLECTION: &str = "users";
