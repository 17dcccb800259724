//! Configuration types module

pub mod app;
pub mod logging;
pub mod remote;

// Re-export main types
pub use app::*;
pub use logging::LoggingConfig;
pub use remote::RemoteStoreConfig;
