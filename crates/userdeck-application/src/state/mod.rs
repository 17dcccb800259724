//! Observable State
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StateHolder`] | Current immutable snapshot plus subscribers |
//! | [`ReadOnlyState`] | Read-only handle handed to consumers |
//! | [`DerivedState`] | Projection recomputed when a selected sub-value changes |
//! | [`Subscription`] | Callback registration, detached on drop |
//! | [`ViewModelScope`] | Cancellation scope owning in-flight work |
//!
//! ## Publication rules
//!
//! ```text
//! update(transform) ──► transform(&current) ──► equal? ──yes──► nothing published
//!                                                  │
//!                                                  no
//!                                                  ▼
//!                              store snapshot ─► callbacks (in order) ─► stream
//! ```

/// Derived views
pub mod derived;
/// State holder and subscriptions
pub mod holder;
/// Owning scope for async work
pub mod scope;

pub use derived::DerivedState;
pub use holder::{
    DEFAULT_CHANNEL_CAPACITY, ReadOnlyState, StateHolder, StateStream, Subscription,
};
pub use scope::ViewModelScope;
