//! forge::traits
//!
//! Forge trait definition for interacting with the pull request host.
//!
//! # Design
//!
//! The forge acts on the branch checked out in its working directory, the
//! way `gh pr create` and `gh pr edit` do. Execution therefore builds a forge
//! rooted in the temporary worktree, while listing can use any directory
//! of the repository.
//!
//! # Example
//!
//! ```no_run
//! use pr_cli::forge::{CreatePrRequest, Forge, ForgeError};
//!
//! fn open_pr(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     forge.create_pr(CreatePrRequest {
//!         base: "main".to_string(),
//!         title: "Add feature".to_string(),
//!         body: "Description".to_string(),
//!         draft: false,
//!     })
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::process::ProcessError;

/// Errors from forge operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The forge CLI failed.
    #[error(transparent)]
    Command(#[from] ProcessError),

    /// The forge CLI returned output that could not be understood.
    #[error("invalid response from {forge}: {message}")]
    InvalidResponse {
        forge: &'static str,
        message: String,
    },

    /// The forge refused the operation.
    #[error("{0}")]
    Rejected(String),
}

/// Request to create a pull request for the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrRequest {
    /// Base branch name (the branch to merge into)
    pub base: String,
    pub title: String,
    pub body: String,
    /// Create as draft
    pub draft: bool,
}

/// Request to edit the pull request of the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePrRequest {
    pub title: String,
    pub body: String,
    /// New base branch (if changing)
    pub base: Option<String>,
}

/// Filter for listing open pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrFilter {
    /// Head branch name
    pub head: Option<String>,
    /// Author login, `@me` for the authenticated user
    pub author: Option<String>,
}

impl PrFilter {
    pub fn head(branch: impl Into<String>) -> Self {
        Self {
            head: Some(branch.into()),
            author: None,
        }
    }

    pub fn mine() -> Self {
        Self {
            head: None,
            author: Some("@me".to_string()),
        }
    }
}

/// A commit as reported by the forge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrCommit {
    pub oid: String,
    pub message_headline: String,
    #[serde(default)]
    pub message_body: String,
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub is_draft: bool,
    /// Head branch name
    #[serde(rename = "headRefName")]
    pub head: String,
    /// Base branch name
    #[serde(rename = "baseRefName")]
    pub base: String,
    #[serde(default)]
    pub commits: Vec<PrCommit>,
}

/// The pull request host.
pub trait Forge {
    /// Forge name for messages.
    fn name(&self) -> &'static str;

    /// Open a pull request for the current branch.
    fn create_pr(&self, request: CreatePrRequest) -> Result<(), ForgeError>;

    /// Edit the pull request of the current branch.
    fn update_pr(&self, request: UpdatePrRequest) -> Result<(), ForgeError>;

    /// Mark the pull request of the current branch as draft or ready.
    fn set_draft(&self, draft: bool) -> Result<(), ForgeError>;

    /// List open pull requests.
    fn list_prs(&self, filter: &PrFilter) -> Result<Vec<PullRequest>, ForgeError>;

    /// Find the open pull request whose head is `branch`.
    ///
    /// A pull request from another fork with the same branch name also
    /// matches; the first one wins.
    fn find_pr_by_head(&self, branch: &str) -> Result<Option<PullRequest>, ForgeError> {
        let mut prs = self.list_prs(&PrFilter::head(branch))?;
        if prs.len() > 1 {
            let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
            tracing::warn!(?numbers, "more than one pull request matches the branch");
        }
        Ok(if prs.is_empty() {
            None
        } else {
            Some(prs.swap_remove(0))
        })
    }
}
