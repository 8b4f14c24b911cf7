//! Error types for configuration operations.
//!
//! This module defines the error types that can occur while loading,
//! resolving, and querying the project configuration.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON5 (or plain JSON) configuration document.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),

    /// Failed to convert or serialize configuration JSON.
    #[error("failed to process config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The store was queried before any configuration was installed.
    ///
    /// There is no fallback default configuration; callers must install
    /// one at startup before reading it.
    #[error("project config not set")]
    NotSet,

    /// A configuration source resolved to nothing (empty output or a
    /// JSON `null`).
    #[error("config source {path} produced no configuration")]
    EmptySource {
        /// The source that came up empty.
        path: PathBuf,
    },

    /// Failed to execute a config-producing program.
    #[error("failed to run config program {path}: {source}")]
    ExecFailed {
        /// The program that could not be run.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config-producing program exited with a failure status.
    #[error("config program {path} failed with exit code {code:?}: {stderr}")]
    ExecError {
        /// The program that failed.
        path: PathBuf,
        /// The exit code, if available.
        code: Option<i32>,
        /// The stderr output.
        stderr: String,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
