//! core::config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$PR_CLI_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/pr-cli/config.toml`
//! 3. `~/.pr-cli/config.toml`
//!
//! # Repo Config Location
//!
//! `pr-cli/config.toml` in the repository's common git directory (shared
//! by all worktrees), see [`PrCliPaths::repo_config_path`].
//!
//! # Example
//!
//! ```no_run
//! use pr_cli::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("fetch before picking: {}", config.fetch());
//! ```

pub mod schema;

pub use schema::{ConfigFile, PickDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::PrCliPaths;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Repository configuration (if present)
    pub repo: Option<ConfigFile>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// `common_dir` is the repository's common git directory; when given,
    /// the repo file is loaded too.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed or
    /// validated. Missing files are not an error.
    pub fn load(common_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let global = match Self::global_path() {
            Some(path) => Self::read_file(&path)?,
            None => ConfigFile::default(),
        };

        let repo = match common_dir.map(PrCliPaths::repo_config_path) {
            Some(path) if path.exists() => Some(Self::read_file(&path)?),
            _ => None,
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Self { global, repo })
    }

    /// Locate the global config file, if one exists.
    fn global_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PR_CLI_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("pr-cli/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        PrCliPaths::from_home()
            .map(|paths| paths.config_path())
            .filter(|path| path.exists())
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        tracing::debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn pick_value(&self, get: impl Fn(&PickDefaults) -> Option<bool>) -> Option<bool> {
        self.repo
            .as_ref()
            .and_then(|r| r.pick.as_ref())
            .and_then(&get)
            .or_else(|| self.global.pick.as_ref().and_then(&get))
    }

    /// Configured pull remote, if any.
    pub fn pull_remote(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.pull_remote.as_deref())
            .or(self.global.pull_remote.as_deref())
    }

    /// Configured push remote, if any.
    pub fn push_remote(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.push_remote.as_deref())
            .or(self.global.push_remote.as_deref())
    }

    /// Fetch before picking (default: true).
    pub fn fetch(&self) -> bool {
        self.pick_value(|p| p.fetch).unwrap_or(true)
    }

    /// Push the new branch (default: true).
    pub fn push(&self) -> bool {
        self.pick_value(|p| p.push).unwrap_or(true)
    }

    /// Open a pull request (default: true).
    pub fn pr(&self) -> bool {
        self.pick_value(|p| p.pr).unwrap_or(true)
    }

    /// Open pull requests as drafts (default: false).
    pub fn draft(&self) -> bool {
        self.pick_value(|p| p.draft).unwrap_or(false)
    }
}
