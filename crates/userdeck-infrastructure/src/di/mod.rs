//! Dependency Injection - binding tables and composition root
//!
//! ```text
//! AppConfig.profile → Binding table → Resolver → linkme registry → Arc<dyn UserRepository>
//!                                         ↓
//!                                    AppContext (singleton cache)
//! ```
//!
//! Consumers ask [`AppContext`] for a capability. Which implementation they
//! get is decided by the profile's binding table, never by the consumer.

pub mod bindings;
pub mod bootstrap;
pub mod provider_resolvers;

pub use bindings::{Binding, Lifetime, bindings_for};
pub use bootstrap::{AppContext, init_app};
pub use provider_resolvers::UserRepositoryResolver;
