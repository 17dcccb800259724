//! Shared provider utilities

/// HTTP response handling
pub mod http_response;

pub use http_response::HttpResponseUtils;
