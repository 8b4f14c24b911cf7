//! Process-wide configuration store.
//!
//! The tool suite reads one [`ProjectConfig`] per process. The store is
//! written once at startup and read many times afterwards; querying it
//! before anything was installed fails with [`ConfigError::NotSet`]
//! rather than falling back to a silent default.

use std::sync::RwLock;

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Holder for a single installed [`ProjectConfig`].
///
/// The process-global instance is reachable through [`set_config`] and
/// [`get_config`]; separate instances can be created where injecting
/// the store explicitly is preferable (tests do this to stay isolated
/// from the global).
///
/// # Examples
///
/// ```
/// use scythe_config::ConfigStore;
///
/// let store = ConfigStore::new();
/// assert!(store.get().is_err());
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    inner: RwLock<Option<ProjectConfig>>,
}

impl ConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Installs a configuration, replacing any previous one.
    ///
    /// There are no merge semantics: the last write wins. Returns the
    /// configuration that is now installed.
    pub fn set(&self, config: ProjectConfig) -> ProjectConfig {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(config.clone());
        config
    }

    /// Returns the currently installed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotSet`] if no configuration has ever
    /// been installed.
    pub fn get(&self) -> Result<ProjectConfig> {
        let slot = self.inner.read().unwrap_or_else(|e| e.into_inner());
        slot.clone().ok_or(ConfigError::NotSet)
    }
}

/// The process-global store backing [`set_config`] and [`get_config`].
static STORE: ConfigStore = ConfigStore::new();

/// Installs `config` as the process-wide configuration.
///
/// Expected to be called once at startup, before any [`get_config`].
/// Calling it again replaces the previous configuration wholesale.
pub fn set_config(config: ProjectConfig) -> ProjectConfig {
    STORE.set(config)
}

/// Returns the process-wide configuration.
///
/// # Errors
///
/// Returns [`ConfigError::NotSet`] if [`set_config`] was never called.
pub fn get_config() -> Result<ProjectConfig> {
    STORE.get()
}
