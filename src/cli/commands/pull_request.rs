//! pull-request command - Create a pull request for the current branch

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::forge::gh;
use crate::ui::output;

/// Open a pull request for the checked out branch, filled in from its
/// commits.
pub fn pull_request(ctx: &Context, base: Option<&str>) -> Result<()> {
    let cwd = ctx.cwd()?;
    output::status("Creating pull request", ctx.verbosity());
    gh::create_pr_autofill(&cwd, base).context("Failed to create pull request")?;
    output::success("Done!", ctx.verbosity());
    Ok(())
}
