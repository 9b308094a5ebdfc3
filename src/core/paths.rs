//! core::paths
//!
//! Centralized path routing for pr-cli storage locations.
//!
//! # Storage Layout
//!
//! Per-user data lives under `~/.pr-cli/`:
//! - `config.toml` - Global configuration (fallback location)
//! - `bin/` - Tools installed by `pr-cli install-deps`
//!
//! Per-repository data lives under `<common_dir>/pr-cli/`, where
//! `common_dir` is the git directory shared by all worktrees:
//! - `config.toml` - Repository configuration
//!
//! # Example
//!
//! ```
//! use pr_cli::core::paths::PrCliPaths;
//! use std::path::{Path, PathBuf};
//!
//! let paths = PrCliPaths::new("/home/me/.pr-cli");
//! assert_eq!(paths.gum_path(), PathBuf::from("/home/me/.pr-cli/bin/gum"));
//! assert_eq!(
//!     PrCliPaths::repo_config_path(Path::new("/repo/.git")),
//!     PathBuf::from("/repo/.git/pr-cli/config.toml")
//! );
//! ```

use std::path::{Path, PathBuf};

const DIR_NAME: &str = ".pr-cli";
const REPO_DIR_NAME: &str = "pr-cli";
const CONFIG_FILE: &str = "config.toml";

/// Per-user storage locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrCliPaths {
    root: PathBuf,
}

impl PrCliPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.pr-cli`, or `None` if the home directory is unknown.
    pub fn from_home() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for installed tools.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Where `install-deps` puts `gum`.
    pub fn gum_path(&self) -> PathBuf {
        self.bin_dir().join(executable_name("gum"))
    }

    /// Fallback global config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Repository config file inside the shared git directory.
    pub fn repo_config_path(common_dir: &Path) -> PathBuf {
        common_dir.join(REPO_DIR_NAME).join(CONFIG_FILE)
    }
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}
