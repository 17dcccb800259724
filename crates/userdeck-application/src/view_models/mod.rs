//! View-Models
//!
//! Presentation-side orchestration: each view-model owns its state, derived
//! views and scope, and receives its repository through the constructor.

/// Overview screen view-model
pub mod overview;

pub use overview::{OverviewState, OverviewViewModel, adults_of};
