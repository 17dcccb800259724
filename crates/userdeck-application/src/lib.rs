//! Application Layer - Userdeck
//!
//! Observable state, view-models and the provider registry.
//!
//! ## Architecture
//!
//! The application layer:
//! - Holds UI-relevant state as immutable snapshots ([`state::StateHolder`])
//! - Projects derived views from that state ([`state::DerivedState`])
//! - Ties async work to an owning scope ([`state::ViewModelScope`])
//! - Orchestrates repositories from view-models ([`view_models`])
//! - Declares the registry providers plug into ([`ports::registry`])
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `userdeck-domain`: entities, errors and the repository port
//! - Pure Rust libraries for async, locking and registration

pub mod ports;
pub mod state;
pub mod view_models;

pub use state::{
    DerivedState, ReadOnlyState, StateHolder, StateStream, Subscription, ViewModelScope,
};
pub use view_models::{OverviewState, OverviewViewModel};
