//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Gathers what it needs from git, the forge and the user
//! 3. Executes and reports progress through [`crate::ui::output`]
//!
//! # Async Commands
//!
//! Only `install-deps` does network I/O of its own. It builds a tokio
//! runtime for the duration of the command; everything else is blocking.

mod completion;
mod install_deps;
mod pick;
mod pull_request;
mod update_pull_request;
mod verify;

pub use completion::completion;
pub use install_deps::install_deps;
pub use pick::{pick, submit, SubmitOutcome};
pub use pull_request::pull_request;
pub use update_pull_request::update_pull_request;
pub use verify::{check_dependencies, dependency_statuses, verify, DependencyStatus};

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Pick(args) => pick::pick(ctx, args),
        Command::UpdatePullRequest => update_pull_request::update_pull_request(ctx),
        Command::PullRequest { base } => pull_request::pull_request(ctx, base.as_deref()),
        Command::Verify => verify::verify(ctx),
        Command::InstallDeps {
            ignore_system,
            force,
        } => install_deps::install_deps(ctx, ignore_system, force),
        Command::Completion { shell } => completion::completion(shell),
    }
}
