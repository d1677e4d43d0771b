//! Persister configuration via `typedkv.toml`
//!
//! The only tunable is the worker pool that runs list fan-out. On first open
//! of a directory a commented default `typedkv.toml` is written; edit it and
//! reopen to change settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use typedkv_core::{Error, Result};

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "typedkv.toml";

fn default_thread_name_prefix() -> String {
    "typedkv-worker".to_string()
}

/// Persister configuration loaded from `typedkv.toml`.
///
/// # Example
///
/// ```toml
/// # Number of fan-out worker threads (default: one per CPU)
/// # worker_threads = 8
/// thread_name_prefix = "typedkv-worker"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistConfig {
    /// Fan-out worker threads. `None` lets rayon pick one per CPU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_threads: Option<usize>,
    /// Worker thread names are `<prefix>-<index>`.
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            thread_name_prefix: default_thread_name_prefix(),
        }
    }
}

impl PersistConfig {
    /// Config with a fixed number of worker threads
    pub fn with_worker_threads(threads: usize) -> Self {
        Self {
            worker_threads: Some(threads),
            ..Self::default()
        }
    }

    /// Check values that deserialize fine but cannot build a pool.
    ///
    /// # Errors
    ///
    /// Returns an error if `worker_threads` is zero or the thread name prefix
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == Some(0) {
            return Err(Error::config(
                "worker_threads must be at least 1 (omit it to use one per CPU)",
            ));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# typedkv configuration
#
# Number of worker threads used to persist and restore list elements.
# Omit to use one thread per CPU.
# worker_threads = 8

# Worker threads are named "<prefix>-<index>".
thread_name_prefix = "typedkv-worker"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: PersistConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
