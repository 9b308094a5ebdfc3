//! update-pull-request command - Re-run pick for one of your open PRs
//!
//! The chosen pull request's head, base and title seed the pick flow, which
//! then finds the pull request again and switches to update mode.

use anyhow::{bail, Context as _, Result};

use super::pick::pick;
use super::verify::check_dependencies;
use crate::cli::args::PickArgs;
use crate::cli::Context;
use crate::forge::gh::GhCli;
use crate::forge::{Forge, PrFilter, PullRequest};
use crate::ui::gum::Gum;
use crate::ui::prompts::{choose_one, Prompter};

/// Choose which of `prs` to update.
fn choose_pull_request<'a>(
    prompter: &mut dyn Prompter,
    prs: &'a [PullRequest],
) -> Result<&'a PullRequest> {
    if prs.is_empty() {
        bail!("No pull requests to update");
    }
    Ok(choose_one(
        prompter,
        prs,
        |pr| pr.title.clone(),
        "What PR do you want to update?",
        None,
    )?)
}

/// Arguments that replay pick for `pr`.
fn pick_args_for(pr: &PullRequest) -> PickArgs {
    PickArgs {
        branch: Some(pr.head.clone()),
        base: Some(pr.base.clone()),
        title: Some(pr.title.clone()),
        ..PickArgs::default()
    }
}

/// Update one of the current user's open pull requests.
pub fn update_pull_request(ctx: &Context) -> Result<()> {
    check_dependencies(ctx)?;
    if !ctx.interactive {
        bail!("update-pull-request needs an interactive terminal, use 'pr-cli pick --branch' instead");
    }

    let forge = GhCli::new(ctx.cwd()?);
    let prs = forge
        .list_prs(&PrFilter::mine())
        .context("Failed to list pull requests")?;
    tracing::debug!(count = prs.len(), "open pull requests");

    let chosen = choose_pull_request(&mut Gum::locate(), &prs)?;
    tracing::debug!(number = chosen.number, head = %chosen.head, "updating pull request");

    pick(ctx, pick_args_for(chosen))
}
