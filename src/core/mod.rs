//! core
//!
//! Core domain types and rules for pr-cli.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, RemoteName, Commit, Commits
//! - [`settings`] - The choices for one cherry-pick-and-PR run
//! - [`naming`] - Branch name suggestions, validation and titles
//! - [`pr_body`] - Pull request body generation
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for pr-cli storage
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Nothing in this module touches the terminal or spawns processes

pub mod config;
pub mod naming;
pub mod paths;
pub mod pr_body;
pub mod settings;
pub mod types;
