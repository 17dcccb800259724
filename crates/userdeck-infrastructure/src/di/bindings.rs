//! Binding tables
//!
//! One static table per [`Profile`]. Each entry maps a capability to the
//! implementation that serves it and to how long an instance lives.

use crate::config::Profile;
use crate::constants::{
    CAPABILITY_OVERVIEW_VIEW_MODEL, CAPABILITY_USER_REPOSITORY, PROVIDER_MEMORY, PROVIDER_REMOTE,
};
use std::fmt;

/// How long a resolved instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Created on first request, then shared for the life of the container
    Singleton,
    /// Created fresh for every request
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}

/// A capability bound to an implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Capability consumers depend on
    pub capability: &'static str,
    /// Implementation name (registry name for repositories)
    pub implementation: &'static str,
    /// Instance lifetime
    pub lifetime: Lifetime,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.capability, self.implementation, self.lifetime
        )
    }
}

static PRODUCTION_BINDINGS: [Binding; 2] = [
    Binding {
        capability: CAPABILITY_USER_REPOSITORY,
        implementation: PROVIDER_REMOTE,
        lifetime: Lifetime::Singleton,
    },
    Binding {
        capability: CAPABILITY_OVERVIEW_VIEW_MODEL,
        implementation: CAPABILITY_OVERVIEW_VIEW_MODEL,
        lifetime: Lifetime::Transient,
    },
];

static TEST_BINDINGS: [Binding; 2] = [
    Binding {
        capability: CAPABILITY_USER_REPOSITORY,
        implementation: PROVIDER_MEMORY,
        lifetime: Lifetime::Singleton,
    },
    Binding {
        capability: CAPABILITY_OVERVIEW_VIEW_MODEL,
        implementation: CAPABILITY_OVERVIEW_VIEW_MODEL,
        lifetime: Lifetime::Transient,
    },
];

/// Binding table of a profile
pub fn bindings_for(profile: Profile) -> &'static [Binding] {
    match profile {
        Profile::Production => &PRODUCTION_BINDINGS,
        Profile::Test => &TEST_BINDINGS,
    }
}

/// Binding of `capability` in `bindings`, if any
pub fn find_binding(bindings: &'static [Binding], capability: &str) -> Option<&'static Binding> {
    bindings.iter().find(|b| b.capability == capability)
}
