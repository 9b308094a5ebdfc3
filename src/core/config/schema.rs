//! core::config::schema
//!
//! Configuration file schema.
//!
//! The same schema is used for the global file and the repository file;
//! values in the repository file take precedence.
//!
//! # Validation
//!
//! Config values are validated after parsing: remote names must be usable
//! as [`RemoteName`]s.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RemoteName;

/// Contents of one configuration file.
///
/// # Example
///
/// ```toml
/// pull_remote = "upstream"
/// push_remote = "origin"
///
/// [pick]
/// fetch = true
/// draft = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Remote to fetch the base branch from
    pub pull_remote: Option<String>,

    /// Remote to push new branches to
    pub push_remote: Option<String>,

    /// Defaults for the `pick` command
    pub pick: Option<PickDefaults>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("pull_remote", &self.pull_remote),
            ("push_remote", &self.push_remote),
        ] {
            if let Some(remote) = value {
                RemoteName::new(remote.as_str())
                    .map_err(|e| ConfigError::InvalidValue(format!("{key}: {e}")))?;
            }
        }
        Ok(())
    }
}

/// `pick` command defaults. Unset values fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PickDefaults {
    /// Fetch the pull remote before branching
    pub fetch: Option<bool>,

    /// Push the new branch
    pub push: Option<bool>,

    /// Open a pull request
    pub pr: Option<bool>,

    /// Open pull requests as drafts
    pub draft: Option<bool>,
}
