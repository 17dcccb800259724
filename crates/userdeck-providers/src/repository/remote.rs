//! Remote user repository
//!
//! Talks to a document store over HTTP/JSON. Users live in a collection and
//! are addressed as documents:
//!
//! | Operation | Request | Outcome |
//! |-----------|---------|---------|
//! | `get_user` | `GET {base}/collections/{collection}/documents/{id}` | 200 → user, 404 → absent |
//! | `add_user` | `PUT {base}/collections/{collection}/documents/{id}` | 2xx → stored, 404 → `NotFound` |
//! | `list_users` | `GET {base}/collections/{collection}/documents` | 200 → users ordered by id |
//!
//! Any other status, connection failures, timeouts and undecodable bodies
//! surface as `Error::Transport`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use userdeck_domain::constants::USERS_COLLECTION;
use userdeck_domain::entities::{User, validate_user_id};
use userdeck_domain::error::{Error, Result};
use userdeck_domain::ports::UserRepository;

use crate::constants::{
    CONTENT_TYPE_JSON, REMOTE_COLLECTIONS_SEGMENT, REMOTE_DEFAULT_TIMEOUT_SECS,
    REMOTE_DOCUMENTS_SEGMENT,
};
use crate::utils::HttpResponseUtils;

/// A stored document: the user plus the id it is filed under
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    id: String,
    #[serde(flatten)]
    user: User,
}

/// Remote user repository
///
/// Receives its HTTP client via constructor injection, so callers decide on
/// connection pooling and proxies.
///
/// ## Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use userdeck_providers::repository::RemoteUserRepository;
///
/// fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let repository = RemoteUserRepository::new(
///         "https://store.example.com",
///         "users",
///         Duration::from_secs(10),
///         None,
///         reqwest::Client::new(),
///     )?;
///     assert_eq!(repository.collection(), "users");
///     Ok(())
/// }
/// ```
pub struct RemoteUserRepository {
    base_url: Url,
    collection: String,
    timeout: Duration,
    api_key: Option<String>,
    http_client: Client,
}

impl RemoteUserRepository {
    /// Create a new remote repository
    ///
    /// # Arguments
    /// * `base_url` - Root URL of the document store
    /// * `collection` - Collection holding the users
    /// * `timeout` - Per-request timeout
    /// * `api_key` - Optional bearer token
    /// * `http_client` - Reqwest client used for every request
    pub fn new(
        base_url: &str,
        collection: impl Into<String>,
        timeout: Duration,
        api_key: Option<String>,
        http_client: Client,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid remote base URL '{base_url}'"),
            source: Some(Box::new(e)),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "Remote base URL '{base_url}' cannot hold a path"
            )));
        }

        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(Error::configuration("Remote collection cannot be empty"));
        }

        Ok(Self {
            base_url,
            collection,
            timeout,
            api_key,
            http_client,
        })
    }

    /// Root URL of the document store
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Collection holding the users
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL of the collection's documents, or of one document when `id` is given
    ///
    /// Segments are percent-encoded, so ids may contain `/` or spaces.
    fn documents_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::configuration("Remote base URL cannot hold a path"))?;
            segments.pop_if_empty().extend([
                REMOTE_COLLECTIONS_SEGMENT,
                self.collection.as_str(),
                REMOTE_DOCUMENTS_SEGMENT,
            ]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        self.authorize(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::transport(format!("Request timed out after {:?}", self.timeout))
                } else {
                    Error::transport_with_source("HTTP request failed", e)
                }
            })
    }

    fn resource(&self, id: &str) -> String {
        format!("user '{id}' in collection '{}'", self.collection)
    }
}

impl std::fmt::Debug for RemoteUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteUserRepository")
            .field("base_url", &self.base_url.as_str())
            .field("collection", &self.collection)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl UserRepository for RemoteUserRepository {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        validate_user_id(id)?;
        let url = self.documents_url(Some(id))?;
        let response = self.send(self.http_client.get(url)).await?;

        match HttpResponseUtils::check_and_parse::<UserDocument>(response, &self.resource(id)).await
        {
            Ok(document) => Ok(Some(document.user)),
            Err(e) if e.is_not_found() => {
                debug!("user not present in remote store");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, user), fields(collection = %self.collection))]
    async fn add_user(&self, id: &str, user: User) -> Result<()> {
        validate_user_id(id)?;
        let url = self.documents_url(Some(id))?;
        let document = UserDocument {
            id: id.to_string(),
            user,
        };
        let request = self
            .http_client
            .put(url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&document);
        let response = self.send(request).await?;

        HttpResponseUtils::check_status(response, &self.resource(id)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.documents_url(None)?;
        let response = self.send(self.http_client.get(url)).await?;

        let resource = format!("collection '{}'", self.collection);
        let mut documents: Vec<UserDocument> =
            HttpResponseUtils::check_and_parse(response, &resource).await?;
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = documents.len(), "listed remote users");
        Ok(documents.into_iter().map(|d| d.user).collect())
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use userdeck_application::ports::registry::{
    USER_REPOSITORIES, UserRepositoryConfig, UserRepositoryEntry,
};

/// Factory function for creating remote repository instances.
fn remote_factory(
    config: &UserRepositoryConfig,
) -> std::result::Result<Arc<dyn UserRepository>, String> {
    let base_url = config
        .base_url
        .clone()
        .ok_or_else(|| "Remote repository requires a base URL".to_string())?;
    let collection = config
        .collection
        .clone()
        .unwrap_or_else(|| USERS_COLLECTION.to_string());
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(REMOTE_DEFAULT_TIMEOUT_SECS));
    let http_client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    let repository = RemoteUserRepository::new(
        &base_url,
        collection,
        timeout,
        config.api_key.clone(),
        http_client,
    )
    .map_err(|e| e.to_string())?;
    Ok(Arc::new(repository))
}

#[linkme::distributed_slice(USER_REPOSITORIES)]
static REMOTE_REPOSITORY: UserRepositoryEntry = UserRepositoryEntry {
    name: "remote",
    description: "Document store reached over HTTP/JSON",
    factory: remote_factory,
};
