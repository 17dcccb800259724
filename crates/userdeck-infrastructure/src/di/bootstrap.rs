//! DI Container Bootstrap - composition root
//!
//! Builds the [`AppContext`] from configuration. The profile selects a
//! binding table; repositories are resolved by name through the linkme
//! registry and cached according to their binding's lifetime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(AppConfig::for_profile(Profile::Test)).await?;
//!
//! // Same code regardless of the profile
//! let view_model = context.overview_view_model()?;
//! view_model.fetch_users().await?;
//! ```

use crate::config::{AppConfig, Profile};
use crate::config::loader::validate_app_config;
use crate::constants::{CAPABILITY_OVERVIEW_VIEW_MODEL, CAPABILITY_USER_REPOSITORY};
use crate::di::bindings::{Binding, Lifetime, bindings_for, find_binding};
use crate::di::provider_resolvers::UserRepositoryResolver;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info};
use userdeck_application::OverviewViewModel;
use userdeck_domain::error::{Error, Result};
use userdeck_domain::ports::SharedUserRepository;

/// Application context: the composition root
///
/// Holds the configuration, the active binding table and the singleton
/// cache. Cloning is not supported; share it behind an `Arc`.
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    bindings: &'static [Binding],
    resolver: UserRepositoryResolver,

    // Singleton cache, filled on first request
    user_repository: OnceCell<SharedUserRepository>,

    // Explicit instance supplied by the caller, bypasses the bindings
    injected_repository: Option<SharedUserRepository>,
}

impl AppContext {
    /// Active binding profile
    pub fn profile(&self) -> Profile {
        self.config.profile
    }

    /// Active binding table
    pub fn bindings(&self) -> &'static [Binding] {
        self.bindings
    }

    /// Replace the bound repository with an explicit instance
    ///
    /// Every later [`user_repository`](Self::user_repository) call returns
    /// `repository`, whatever the binding table says.
    pub fn with_user_repository(mut self, repository: SharedUserRepository) -> Self {
        info!(
            provider = repository.provider_name(),
            "Using injected user repository"
        );
        self.injected_repository = Some(repository);
        self.user_repository = OnceCell::new();
        self
    }

    /// The repository bound to the `UserRepository` capability
    pub fn user_repository(&self) -> Result<SharedUserRepository> {
        if let Some(repository) = &self.injected_repository {
            return Ok(Arc::clone(repository));
        }

        let binding = self.binding(CAPABILITY_USER_REPOSITORY)?;
        match binding.lifetime {
            Lifetime::Singleton => self
                .user_repository
                .get_or_try_init(|| self.create_user_repository(binding))
                .map(Arc::clone),
            Lifetime::Transient => self.create_user_repository(binding),
        }
    }

    /// A fresh overview view-model wired to the bound repository
    ///
    /// View-models own per-screen state, so every call builds a new one;
    /// only the repository behind it is shared.
    pub fn overview_view_model(&self) -> Result<Arc<OverviewViewModel>> {
        self.binding(CAPABILITY_OVERVIEW_VIEW_MODEL)?;
        let repository = self.user_repository()?;
        Ok(Arc::new(OverviewViewModel::with_capacity(
            repository,
            self.config.state.channel_capacity,
        )))
    }

    fn binding(&self, capability: &str) -> Result<&'static Binding> {
        find_binding(self.bindings, capability).ok_or_else(|| {
            Error::configuration(format!(
                "No binding for {capability} in the {} profile",
                self.profile()
            ))
        })
    }

    fn create_user_repository(&self, binding: &Binding) -> Result<SharedUserRepository> {
        let repository = self.resolver.resolve(binding.implementation)?;
        debug!(
            implementation = binding.implementation,
            lifetime = %binding.lifetime,
            "Created user repository"
        );
        Ok(repository)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("profile", &self.profile())
            .field("bindings", &self.bindings)
            .field("injected", &self.injected_repository.is_some())
            .finish_non_exhaustive()
    }
}

/// Initialize the application context
///
/// Validates the configuration and checks that every repository binding of
/// the active profile names a registered provider. Instances are created
/// lazily on first request.
///
/// Providers are auto-registered via linkme distributed slices when
/// userdeck-providers is linked. No explicit registration call is needed.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    info!(profile = %config.profile, "Initializing application context");

    validate_app_config(&config)?;

    let config = Arc::new(config);
    let bindings = bindings_for(config.profile);
    let resolver = UserRepositoryResolver::new(Arc::clone(&config));

    let unregistered = find_binding(bindings, CAPABILITY_USER_REPOSITORY)
        .filter(|binding| !resolver.is_registered(binding.implementation));
    if let Some(binding) = unregistered {
        return Err(Error::configuration(format!(
            "UserRepository: provider '{}' is not registered. Available providers: {:?}",
            binding.implementation,
            resolver.list_available()
        )));
    }

    for binding in bindings {
        debug!(%binding, "Bound capability");
    }
    info!("Application context ready");

    Ok(AppContext {
        config,
        bindings,
        resolver,
        user_repository: OnceCell::new(),
        injected_repository: None,
    })
}
