//! Project configuration for the scythe tool suite.
//!
//! This crate provides the typed configuration every tool in the suite
//! shares: which repository is monitored, where patch mail is routed,
//! the GitHub App identity the tools operate as, and lint thresholds.
//!
//! # Overview
//!
//! - [`ProjectConfig`]: the complete typed configuration shape
//! - [`load_config`] / [`save_config`]: resolution from polymorphic
//!   sources (structured documents or config-producing programs)
//! - [`ConfigStore`], [`set_config`], [`get_config`]: the process-wide
//!   singleton with an explicit "not yet initialized" failure mode
//! - [`ConfigError`]: error types for configuration operations
//!
//! # Sources
//!
//! A configuration source is selected by file extension:
//!
//! - `.json` / `.json5` files are parsed as structured documents
//!   (JSON5 allows comments and trailing commas).
//! - Any other path is executed as a program whose stdout must be a
//!   JSON configuration document, for projects that compute their
//!   configuration.
//!
//! Both resolve to the same [`ProjectConfig`], so consumers never
//! branch on the source format.
//!
//! # Lifecycle
//!
//! ```no_run
//! use scythe_config::{get_config, load_config, set_config};
//!
//! # async fn example() -> scythe_config::Result<()> {
//! // Once, at startup:
//! let config = load_config("project-config.json").await?;
//! set_config(config);
//!
//! // Anywhere afterwards:
//! let config = get_config()?;
//! println!("app: {}", config.app.display_name);
//! # Ok(())
//! # }
//! ```
//!
//! Reading before the startup `set_config` fails with
//! [`ConfigError::NotSet`]; there is no fallback default.

pub mod error;
pub mod loader;
pub mod project;
pub mod store;

// Re-export primary types at crate root for convenience
pub use error::{ConfigError, Result};
pub use loader::{load_config, save_config};
pub use project::{
    AppConfig, LintConfig, MailConfig, MailRepoConfig, ProjectConfig, ProjectInfo, RepoConfig,
    UserConfig,
};
pub use store::{ConfigStore, get_config, set_config};
