//! pr-cli - Cherry-pick commits onto a fresh branch and open a pull request
//!
//! pr-cli picks commits from your current work, applies them to a new branch
//! based on an upstream branch, pushes it and creates (or updates) a GitHub
//! pull request. Everything is reviewed in a single interactive summary
//! before anything is changed.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs commands)
//! - [`core`] - Domain types, settings, naming and configuration
//! - [`git`] - Repository queries via git2, mutations via the git CLI
//! - [`forge`] - Pull request host, driven through the `gh` CLI
//! - [`ui`] - Terminal rendering, key input, prompts and the confirmation loop
//! - [`process`] - Spawning external programs
//!
//! # Guarantees
//!
//! 1. Nothing is changed before the user confirms the summary
//! 2. All git mutations happen in a temporary worktree, never in the
//!    user's checkout
//! 3. Ctrl+C at any prompt aborts without side effects

pub mod cli;
pub mod core;
pub mod forge;
pub mod git;
pub mod process;
pub mod ui;
