//! Configuration loading from polymorphic sources.
//!
//! A configuration source is either a structured-data document or a
//! config-producing program, selected by file extension:
//!
//! - `.json` / `.json5`: parsed directly (the JSON5 parser accepts
//!   plain JSON as well).
//! - anything else: executed as a program whose stdout is a JSON
//!   configuration document. This covers projects that compute their
//!   configuration instead of writing it down.
//!
//! Both paths resolve into the same [`ProjectConfig`] shape, so
//! downstream code never branches on the source format. A source that
//! resolves to nothing (empty output or a JSON `null`) fails with
//! [`ConfigError::EmptySource`].

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Extensions treated as structured-data documents rather than
/// config-producing programs.
const DOCUMENT_EXTENSIONS: &[&str] = &["json", "json5"];

/// Loads a complete [`ProjectConfig`] from the given source.
///
/// # Arguments
///
/// * `path` - Fully qualified path of the configuration source
///
/// # Errors
///
/// Returns an error if the source cannot be read or run, its output
/// cannot be parsed, or it resolves to no configuration at all.
///
/// # Examples
///
/// ```no_run
/// use scythe_config::load_config;
///
/// # async fn example() -> scythe_config::Result<()> {
/// let config = load_config("project-config.json").await?;
/// println!("monitoring {}/{}", config.repo.base_owner, config.repo.name);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(path: impl AsRef<Path>) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let value = if is_document(path) {
        read_document(path)?
    } else {
        run_config_program(path).await?
    };

    if value.is_null() {
        return Err(ConfigError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Saves a configuration as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the
/// configuration cannot be serialized, or the file cannot be written.
pub fn save_config(path: impl AsRef<Path>, config: &ProjectConfig) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Reads and parses a structured-data source into loosely-typed JSON.
///
/// Parsing to [`serde_json::Value`] first lets the caller distinguish
/// "the document said null" from "the document is malformed".
fn read_document(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(serde_json5::from_str(&content)?)
}

/// Runs a config-producing program and parses its stdout as JSON.
async fn run_config_program(path: &Path) -> Result<serde_json::Value> {
    use tokio::process::Command;

    let output = Command::new(path)
        .output()
        .await
        .map_err(|e| ConfigError::ExecFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ConfigError::ExecError {
            path: path.to_path_buf(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(ConfigError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    Ok(serde_json::from_str(stdout)?)
}
