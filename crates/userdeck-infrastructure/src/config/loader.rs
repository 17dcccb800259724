//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, using Figment for the layering.

use crate::config::{AppConfig, LoggingConfig, Profile, RemoteStoreConfig, StateConfig};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use userdeck_domain::error::{Error, Result};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Profile forced by the caller, above every other source
    profile_override: Option<Profile>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            profile_override: None,
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Force the binding profile regardless of file and environment
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile_override = Some(profile);
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `USERDECK_REMOTE__BASE_URL`)
    /// 4. The profile set with [`with_profile`](Self::with_profile)
    ///
    /// Loading emits no log events, since it usually runs before the
    /// subscriber is installed. Call [`log_source`](Self::log_source) once
    /// logging is up.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_file) = self.resolved_config_file() {
            figment = figment.merge(Toml::file(config_file));
        }

        // Double underscore separates nested keys so field names keep theirs
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        if let Some(profile) = self.profile_override {
            figment = figment.merge(Serialized::default("profile", profile));
        }

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// TOML file [`load`](Self::load) reads, if any
    ///
    /// An explicit path yields `None` when the file does not exist; without
    /// one, the default locations are searched.
    pub fn resolved_config_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => path.exists().then(|| path.clone()),
            None => Self::find_default_config_path(),
        }
    }

    /// Log which configuration file is in effect
    pub fn log_source(&self) {
        match (self.resolved_config_file(), &self.config_path) {
            (Some(config_file), _) => log_config_loaded(&config_file, true),
            (None, Some(missing)) => log_config_loaded(missing, false),
            (None, None) => debug!("No configuration file found, using defaults"),
        }
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Called by [`ConfigLoader::load`]; also usable on configurations built in
/// code.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_remote_config(config.profile, &config.remote)?;
    validate_state_config(&config.state)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_remote_config(profile: Profile, config: &RemoteStoreConfig) -> Result<()> {
    if config.collection.trim().is_empty() {
        return Err(Error::configuration("Remote collection cannot be empty"));
    }
    if config.timeout_secs == 0 {
        return Err(Error::configuration("Remote timeout cannot be 0"));
    }
    let missing_url = config
        .base_url
        .as_deref()
        .is_none_or(|url| url.trim().is_empty());
    if profile == Profile::Production && missing_url {
        return Err(Error::configuration(
            "Remote base_url is required by the production profile",
        ));
    }
    Ok(())
}

fn validate_state_config(config: &StateConfig) -> Result<()> {
    if config.channel_capacity == 0 {
        return Err(Error::configuration("State channel capacity cannot be 0"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binding profile
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set remote store configuration
    pub fn with_remote(mut self, remote: RemoteStoreConfig) -> Self {
        self.config.remote = remote;
        self
    }

    /// Set the remote store URL, keeping the other remote settings
    pub fn with_remote_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.remote.base_url = Some(base_url.into());
        self
    }

    /// Set state configuration
    pub fn with_state(mut self, state: StateConfig) -> Self {
        self.config.state = state;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
