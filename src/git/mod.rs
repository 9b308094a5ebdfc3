//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`
//! or spawns `git` directly.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Remote listing and remote default branches
//! - Commit ranges, revision verification and commit bodies
//! - The temporary-worktree workflow: fetch, worktree add/remove,
//!   cherry-pick and push
//!
//! # Example
//!
//! ```no_run
//! use pr_cli::git::{Git, RemoteSource};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let commits = git.commits_since("upstream/main").unwrap();
//! println!("{} new commits", commits.len());
//! ```

mod interface;

pub use interface::{cherry_pick, push, BranchMode, Git, GitError, RemoteSource};
