//! Provider constants

/// Default request timeout for the remote repository, in seconds
pub const REMOTE_DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path segment preceding the collection name
pub const REMOTE_COLLECTIONS_SEGMENT: &str = "collections";

/// Path segment preceding document ids
pub const REMOTE_DOCUMENTS_SEGMENT: &str = "documents";

/// Content type sent with JSON payloads
pub const CONTENT_TYPE_JSON: &str = "application/json";
