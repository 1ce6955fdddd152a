//! Holder for the current configuration.
//!
//! # Design Decisions
//! - An explicit value handed to whoever needs it, not a process global
//! - Reads are lock-free (`ArcSwapOption`); a load replaces the whole config
//! - Reading before anything was loaded is an error, not a default

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::ServerConfig;
use crate::config::validation::validate_config;

#[derive(Debug, Default)]
pub struct ConfigStore {
    current: ArcSwapOption<ServerConfig>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file and make it current.
    ///
    /// On failure the previous configuration (if any) stays in place.
    pub fn load(&self, path: &Path) -> Result<Arc<ServerConfig>, ConfigError> {
        let config = Arc::new(load_config(path)?);
        self.current.store(Some(Arc::clone(&config)));
        Ok(config)
    }

    /// Validate and install an already-built configuration.
    pub fn set(&self, config: ServerConfig) -> Result<Arc<ServerConfig>, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let config = Arc::new(config);
        self.current.store(Some(Arc::clone(&config)));
        Ok(config)
    }

    /// The current configuration.
    pub fn current(&self) -> Result<Arc<ServerConfig>, ConfigError> {
        self.current.load_full().ok_or(ConfigError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}
