//! git::interface
//!
//! Git interface implementation.
//!
//! Reads (remotes, branches, commits, remote HEADs) go through `git2`.
//! Mutations that must behave exactly like the user's own git (fetch,
//! worktrees, cherry-pick, push) shell out to the `git` CLI so that hooks,
//! credentials and configuration apply as usual.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::InvalidCommit`]: A revision does not name a commit
//! - [`GitError::Command`]: The `git` CLI failed
//!
//! # Example
//!
//! ```no_run
//! use pr_cli::git::{Git, RemoteSource};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! for remote in git.list_remotes().unwrap() {
//!     println!("{remote}");
//! }
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{BranchName, Commit, CommitWithBody, RemoteName, TypeError};
use crate::process::{self, ProcessError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// A revision does not resolve to a commit.
    #[error("not a valid commit: {rev}")]
    InvalidCommit {
        /// The revision as given
        rev: String,
    },

    /// A name read from the repository failed validation.
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    /// The git CLI failed.
    #[error(transparent)]
    Command(#[from] ProcessError),

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Anything that can list the configured remotes.
///
/// The push-remote chooser only needs this one capability.
pub trait RemoteSource {
    /// Names of all configured remotes.
    fn list_remotes(&self) -> Result<Vec<String>, GitError>;
}

/// Mode for creating the branch in a new worktree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchMode {
    /// `-b`: fail if the branch already exists
    Create,
    /// `-B`: reset an existing branch
    Overwrite,
}

/// The Git interface.
pub struct Git {
    repo: git2::Repository,
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(Self { repo, work_dir })
    }

    /// The `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// The git directory shared by all worktrees of the repository.
    pub fn common_dir(&self) -> &Path {
        self.repo.commondir()
    }

    /// Root of the working tree.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // =========================================================================
    // Branches and Remotes
    // =========================================================================

    /// Get the current branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match head.shorthand() {
            Some(name) if head.is_branch() => Ok(Some(BranchName::new(name)?)),
            _ => Ok(None),
        }
    }

    /// Whether a local branch with this name exists.
    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.repo
            .find_branch(branch.as_str(), git2::BranchType::Local)
            .is_ok()
    }

    /// The branch `refs/remotes/<remote>/HEAD` points at, if known.
    ///
    /// This is the remote's default branch as recorded by `git clone` or
    /// `git remote set-head`.
    pub fn remote_head(&self, remote: &RemoteName) -> Result<Option<String>, GitError> {
        let refname = format!("refs/remotes/{remote}/HEAD");
        let reference = match self.repo.find_reference(&refname) {
            Ok(r) => r,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, &refname)),
        };

        let prefix = format!("refs/remotes/{remote}/");
        Ok(reference
            .symbolic_target()
            .and_then(|target| target.strip_prefix(&prefix))
            .map(String::from))
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Commits reachable from HEAD but not from `base_ref`, newest first.
    ///
    /// Equivalent to `git log <base_ref>..HEAD`.
    pub fn commits_since(&self, base_ref: &str) -> Result<Vec<Commit>, GitError> {
        let base = self
            .repo
            .revparse_single(base_ref)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, base_ref))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_head()?;
        revwalk.hide(base.id())?;

        revwalk
            .map(|oid| {
                let commit = self.repo.find_commit(oid?)?;
                self.to_commit(&commit)
            })
            .collect()
    }

    /// Resolve a user-supplied revision to a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::InvalidCommit`] if `rev` does not name a commit
    pub fn resolve_commit(&self, rev: &str) -> Result<Commit, GitError> {
        let commit = self
            .repo
            .revparse_single(rev)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidCommit {
                rev: rev.to_string(),
            })?;
        self.to_commit(&commit)
    }

    /// Read the full message of a commit, split into subject and body.
    pub fn commit_with_body(&self, commit: &Commit) -> Result<CommitWithBody, GitError> {
        let found = self
            .repo
            .revparse_single(&commit.sha)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidCommit {
                rev: commit.sha.clone(),
            })?;

        Ok(CommitWithBody {
            sha: commit.sha.clone(),
            message: commit.message.clone(),
            body: found.body().unwrap_or("").trim_end().to_string(),
        })
    }

    fn to_commit(&self, commit: &git2::Commit<'_>) -> Result<Commit, GitError> {
        let short = commit.as_object().short_id()?;
        Ok(Commit::new(
            short.as_str().unwrap_or_default(),
            commit.summary().unwrap_or(""),
        ))
    }

    // =========================================================================
    // Mutations (git CLI)
    // =========================================================================

    /// `git fetch <remote> <branch>`
    pub fn fetch(&self, remote: &RemoteName, branch: &str) -> Result<(), GitError> {
        process::run(
            "git",
            ["fetch", remote.as_str(), branch],
            Some(&self.work_dir),
        )?;
        Ok(())
    }

    /// Create a worktree at `path` with `branch` starting at `start`.
    pub fn worktree_add(
        &self,
        path: &Path,
        branch: &BranchName,
        start: &str,
        mode: BranchMode,
    ) -> Result<(), GitError> {
        let flag = match mode {
            BranchMode::Create => "-b",
            BranchMode::Overwrite => "-B",
        };
        process::run(
            "git",
            [
                OsStr::new("worktree"),
                OsStr::new("add"),
                OsStr::new("--no-track"),
                OsStr::new(flag),
                OsStr::new(branch.as_str()),
                path.as_os_str(),
                OsStr::new(start),
            ],
            Some(&self.work_dir),
        )?;
        Ok(())
    }

    /// Remove the worktree at `path`, discarding anything left in it.
    pub fn worktree_remove(&self, path: &Path) -> Result<(), GitError> {
        process::run(
            "git",
            [
                OsStr::new("worktree"),
                OsStr::new("remove"),
                OsStr::new("--force"),
                path.as_os_str(),
            ],
            Some(&self.work_dir),
        )?;
        Ok(())
    }
}

impl RemoteSource for Git {
    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }
}

/// `git cherry-pick <sha>...` inside `worktree`.
pub fn cherry_pick(worktree: &Path, commits: &[Commit]) -> Result<(), GitError> {
    let mut args = vec!["cherry-pick"];
    args.extend(commits.iter().map(|c| c.sha.as_str()));
    process::run("git", args, Some(worktree))?;
    Ok(())
}

/// `git push -u [--force] <remote> <branch>` from `worktree`.
pub fn push(
    worktree: &Path,
    remote: &RemoteName,
    branch: &BranchName,
    force: bool,
) -> Result<(), GitError> {
    let mut args = vec!["push", "-u"];
    if force {
        args.push("--force");
    }
    args.extend([remote.as_str(), branch.as_str()]);
    process::run("git", args, Some(worktree))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn not_found_maps_to_ref_not_found() {
            let err = GitError::from_git2(
                git2::Error::new(
                    git2::ErrorCode::NotFound,
                    git2::ErrorClass::Reference,
                    "missing",
                ),
                "refs/remotes/upstream/main",
            );
            assert!(matches!(
                err,
                GitError::RefNotFound { refname } if refname == "refs/remotes/upstream/main"
            ));
        }

        #[test]
        fn other_codes_are_internal() {
            let err = GitError::from_git2(
                git2::Error::new(git2::ErrorCode::Locked, git2::ErrorClass::Index, "locked"),
                "index",
            );
            assert_eq!(err.to_string(), "git error: index: locked");
        }

        #[test]
        fn type_errors_pass_through() {
            let err: GitError = TypeError::InvalidBranchName("x..y".into()).into();
            assert_eq!(err.to_string(), "invalid branch name: x..y");
        }
    }
}
