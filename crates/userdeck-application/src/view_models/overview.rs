//! Overview View-Model
//!
//! Loads every user from the bound repository and exposes the result as an
//! [`OverviewState`] snapshot, plus an adults-only derived view.

use crate::state::{
    DEFAULT_CHANNEL_CAPACITY, DerivedState, ReadOnlyState, StateHolder, ViewModelScope,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use userdeck_domain::entities::validate_user_id;
use userdeck_domain::error::Result;
use userdeck_domain::ports::SharedUserRepository;
use userdeck_domain::User;

/// Snapshot of the overview screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewState {
    /// Users in repository order
    pub users: Vec<User>,
    /// Whether a fetch is in flight
    pub is_loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
}

/// Starts in the loading state, before the first fetch completes.
impl Default for OverviewState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

/// Users old enough to count as adults, in input order
pub fn adults_of(users: &[User]) -> Vec<User> {
    users.iter().filter(|user| user.is_adult()).cloned().collect()
}

/// View-model for the overview screen
///
/// # Example
///
/// ```ignore
/// let vm = OverviewViewModel::new(repository);
/// vm.fetch_users().await?;
/// println!("{} adults", vm.adults().current().len());
/// ```
pub struct OverviewViewModel {
    repository: SharedUserRepository,
    state: StateHolder<OverviewState>,
    adults: DerivedState<Vec<User>>,
    scope: ViewModelScope,
}

impl OverviewViewModel {
    /// Create a view-model with the default stream capacity
    pub fn new(repository: SharedUserRepository) -> Self {
        Self::with_capacity(repository, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a view-model with a custom stream capacity
    pub fn with_capacity(repository: SharedUserRepository, capacity: usize) -> Self {
        let state = StateHolder::with_capacity(OverviewState::default(), capacity);
        let adults = state.derive(
            |state: &OverviewState| state.users.clone(),
            |users: &Vec<User>| adults_of(users),
        );
        debug!(
            repository = repository.provider_name(),
            "overview view-model created"
        );

        Self {
            repository,
            state,
            adults,
            scope: ViewModelScope::new(),
        }
    }

    /// Read-only overview state
    pub fn state(&self) -> ReadOnlyState<OverviewState> {
        self.state.read_only()
    }

    /// Adults derived from the current users
    pub fn adults(&self) -> &DerivedState<Vec<User>> {
        &self.adults
    }

    /// Scope owning this view-model's background work
    pub fn scope(&self) -> &ViewModelScope {
        &self.scope
    }

    /// Name of the injected repository implementation
    pub fn repository_name(&self) -> &str {
        self.repository.provider_name()
    }

    /// Fetch every user and publish the result
    ///
    /// Publishes `is_loading = true` first, then users and the cleared
    /// loading flag as one update. A failed fetch is recorded in
    /// [`OverviewState::error`] and returned.
    pub async fn fetch_users(&self) -> Result<()> {
        load_users(&self.repository, &self.state, &self.scope).await
    }

    /// Start [`fetch_users`](Self::fetch_users) in the background
    ///
    /// Returns `None` once the view-model is cleared.
    pub fn on_fetch_users(&self) -> Option<JoinHandle<()>> {
        let repository = Arc::clone(&self.repository);
        let state = self.state.clone();
        let scope = self.scope.clone();

        self.scope.spawn(async move {
            if let Err(e) = load_users(&repository, &state, &scope).await {
                warn!(error = %e, "background user fetch failed");
            }
        })
    }

    /// Store a user, then refresh the overview
    pub async fn add_user(&self, id: &str, user: User) -> Result<()> {
        validate_user_id(id)?;
        self.repository.add_user(id, user).await?;
        self.fetch_users().await
    }

    /// Look up a single user without touching the overview state
    pub async fn find_user(&self, id: &str) -> Result<Option<User>> {
        validate_user_id(id)?;
        self.repository.get_user(id).await
    }

    /// End the view-model's scope
    ///
    /// In-flight fetches are cancelled and the state stops accepting updates.
    pub fn clear(&self) {
        self.scope.close();
        self.state.close();
    }

    /// Whether [`clear`](Self::clear) was called
    pub fn is_cleared(&self) -> bool {
        self.scope.is_closed()
    }
}

impl Drop for OverviewViewModel {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for OverviewViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverviewViewModel")
            .field("repository", &self.repository.provider_name())
            .field("state", &self.state.current())
            .field("cleared", &self.is_cleared())
            .finish()
    }
}

async fn load_users(
    repository: &SharedUserRepository,
    state: &StateHolder<OverviewState>,
    scope: &ViewModelScope,
) -> Result<()> {
    if scope.is_closed() {
        debug!("fetch skipped: scope closed");
        return Ok(());
    }

    state.update(|current| OverviewState {
        is_loading: true,
        ..current.clone()
    });

    let Some(outcome) = scope.run(repository.list_users()).await else {
        debug!("scope closed while fetching users; result dropped");
        return Ok(());
    };

    match outcome {
        Ok(users) => {
            debug!(
                count = users.len(),
                repository = repository.provider_name(),
                "users fetched"
            );
            state.update(move |_| OverviewState {
                users,
                is_loading: false,
                error: None,
            });
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, repository = repository.provider_name(), "user fetch failed");
            let message = e.to_string();
            state.update(move |current| OverviewState {
                users: current.users.clone(),
                is_loading: false,
                error: Some(message),
            });
            Err(e)
        }
    }
}
