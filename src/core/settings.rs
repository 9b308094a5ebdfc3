//! core::settings
//!
//! The complete set of choices for one cherry-pick-and-PR operation.
//!
//! A [`Settings`] value is assembled once by the `pick` command (after commit
//! selection, branch name resolution and body generation), handed to the
//! confirmation loop, and then executed. The loop never mutates a value in
//! place: every edit produces a new `Settings`.

use super::types::{BranchName, Commits, RemoteName};

/// Settings for one cherry-pick-and-PR run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Push the branch after cherry-picking.
    pub push: bool,
    /// Push with `--force`, overwriting a diverged remote branch.
    pub force_push: bool,
    /// Replace an existing local branch of the same name.
    pub overwrite_local_branch: bool,
    /// Fetch the pull remote before creating the branch.
    pub fetch: bool,

    pub pull_remote: RemoteName,
    pub push_remote: RemoteName,

    /// Branch that receives the cherry-picked commits.
    pub branch_name: BranchName,
    /// Base branch on the pull remote.
    pub upstream_branch: String,

    /// Commits to apply, oldest first.
    pub commits: Commits,

    /// Open (or update) a pull request.
    pub pr: bool,
    /// Mark the pull request as draft. Only meaningful when `pr` is set.
    pub draft_pr: bool,
    /// Edit the existing pull request for this branch instead of creating one.
    pub update_pr: bool,
    pub title: String,
    pub body: String,
}

impl Settings {
    /// `<pull_remote>/<upstream_branch>`, the ref the new branch starts from.
    pub fn upstream_ref(&self) -> String {
        format!("{}/{}", self.pull_remote, self.upstream_branch)
    }

    /// `<push_remote>/<branch_name>`.
    pub fn push_ref(&self) -> String {
        format!("{}/{}", self.push_remote, self.branch_name)
    }

    /// Check the cross-field rules that must hold before execution.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> Result<(), String> {
        if self.pr && !self.push {
            return Err("a pull request requires the branch to be pushed".into());
        }
        if self.pr && self.title.trim().is_empty() {
            return Err("pull request title cannot be empty".into());
        }
        Ok(())
    }
}

/// Read-only facts about the repository that the summary needs.
///
/// Evaluated once before the confirmation loop starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmationContext {
    /// A local branch named `branch_name` already exists.
    pub branch_exists: bool,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::core::types::Commit;

    /// Settings with one commit, push enabled and no pull request.
    pub fn settings() -> Settings {
        Settings {
            push: true,
            force_push: false,
            overwrite_local_branch: false,
            fetch: true,
            pull_remote: RemoteName::new("upstream").unwrap(),
            push_remote: RemoteName::new("origin").unwrap(),
            branch_name: BranchName::new("fix-bug").unwrap(),
            upstream_branch: "main".to_string(),
            commits: Commits::new(vec![Commit::new("abc123", "Fix bug")]).unwrap(),
            pr: false,
            draft_pr: false,
            update_pr: false,
            title: "Fix bug".to_string(),
            body: String::new(),
        }
    }

    pub fn with_pr() -> Settings {
        Settings {
            pr: true,
            ..settings()
        }
    }
}
