//! pick command - Cherry-pick commits onto a new branch and open a PR
//!
//! # Flow
//!
//! 1. Resolve the pull and push remotes and the base branch
//! 2. Select the commits (from `--commits` or a chooser)
//! 3. Name the branch (from `--branch`, or a prompt with a suggestion)
//! 4. Look for an open pull request on that branch and generate the body
//! 5. Let the user review everything in the confirmation loop
//! 6. Execute in a temporary worktree

mod execute;

pub use execute::{submit, SubmitOutcome};

use anyhow::{anyhow, bail, Context as _, Result};

use crate::cli::args::PickArgs;
use crate::cli::commands::verify::check_dependencies;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::naming::{branch_name_to_title, parse_branch_input, single_line, slugify};
use crate::core::pr_body::{format_body, replace_marked_section};
use crate::core::settings::{ConfirmationContext, Settings};
use crate::core::types::{BranchName, Commit, Commits, RemoteName};
use crate::forge::gh::GhCli;
use crate::forge::{Forge, PullRequest};
use crate::git::{Git, RemoteSource};
use crate::ui::confirm::{confirm_settings, editors, ConfirmIo};
use crate::ui::gum::Gum;
use crate::ui::keys::CrosstermKeys;
use crate::ui::output;
use crate::ui::prompts::{choose_many, Prompter};
use crate::ui::terminal::{CrosstermTerminal, TerminalWriter};

const DEFAULT_PULL_REMOTE: &str = "upstream";
const DEFAULT_PUSH_REMOTE: &str = "origin";
const BRANCH_PLACEHOLDER: &str = "What to call the new branch...";

/// Pick a remote: the explicit one, else the only one, else `preferred`.
fn resolve_remote(
    explicit: Option<&str>,
    remotes: &[String],
    preferred: &str,
    flag: &str,
) -> Result<RemoteName> {
    let name = match explicit {
        Some(name) => {
            if !remotes.iter().any(|remote| remote == name) {
                bail!("Remote '{name}' does not exist");
            }
            name
        }
        None => match remotes {
            [] => bail!("This repository has no remotes"),
            [only] => only.as_str(),
            _ if remotes.iter().any(|remote| remote == preferred) => preferred,
            _ => bail!("Unable to determine which remote to use, pass {flag}"),
        },
    };
    Ok(RemoteName::new(name)?)
}

/// Default branch of the pull remote, else of the push remote.
fn default_base(git: &Git, pull_remote: &RemoteName, push_remote: &RemoteName) -> Result<String> {
    if let Some(head) = git.remote_head(pull_remote)? {
        return Ok(head);
    }
    if let Some(head) = git.remote_head(push_remote)? {
        return Ok(head);
    }
    bail!(
        "Unable to determine the default branch of {pull_remote}, pass --base \
         or run 'git remote set-head {pull_remote} --auto'"
    )
}

fn resolve_base(
    args: &PickArgs,
    git: &Git,
    pull_remote: &RemoteName,
    push_remote: &RemoteName,
    ctx: &Context,
) -> Result<String> {
    if let Some(base) = &args.base {
        return Ok(base.clone());
    }
    if let Some(base) = &args.base_positional {
        output::warn(
            "Providing a base branch as first argument is deprecated, use --base",
            ctx.verbosity(),
        );
        return Ok(base.clone());
    }
    default_base(git, pull_remote, push_remote)
}

fn commit_label(commit: &Commit) -> String {
    format!("{}\t{}", commit.sha, commit.message)
}

/// Let the user choose among `candidates` (newest first, as `git log`
/// lists them). The result is oldest first.
fn choose_commits(prompter: &mut dyn Prompter, candidates: Vec<Commit>) -> Result<Commits> {
    if candidates.is_empty() {
        bail!("No commits to pick");
    }
    let mut candidates = candidates;
    candidates.reverse();

    let chosen = choose_many(
        prompter,
        &candidates,
        commit_label,
        "Which commits do you want to cherry-pick?",
    )?;
    Commits::new(chosen.into_iter().cloned().collect()).map_err(|_| anyhow!("No commits chosen"))
}

fn select_commits(
    git: &Git,
    args: &PickArgs,
    upstream_ref: &str,
    prompter: Option<&mut dyn Prompter>,
) -> Result<Commits> {
    if !args.commits.is_empty() {
        let commits = args
            .commits
            .iter()
            .map(|rev| git.resolve_commit(rev))
            .collect::<Result<Vec<_>, _>>()
            .context("Given commits are invalid")?;
        return Ok(Commits::new(commits)?);
    }

    let candidates = git.commits_since(upstream_ref)?;
    tracing::debug!(count = candidates.len(), upstream_ref, "commits to choose from");
    match prompter {
        Some(prompter) => choose_commits(prompter, candidates),
        None => bail!("No commits given, pass --commits when not running interactively"),
    }
}

/// Branch name suggested for `commits`: the slug of the message of a
/// single commit.
fn suggest_branch(commits: &Commits) -> Option<String> {
    if commits.len() != 1 {
        return None;
    }
    let slug = slugify(&commits.first().message);
    parse_branch_input(&slug).ok().map(String::from)
}

fn resolve_branch(
    args: &PickArgs,
    commits: &Commits,
    prompter: Option<(&mut dyn Prompter, &mut dyn TerminalWriter)>,
) -> Result<BranchName> {
    if let Some(branch) = &args.branch {
        return parse_branch_input(branch).map_err(|message| anyhow!(message));
    }

    let suggestion = suggest_branch(commits);
    tracing::debug!(?suggestion, "suggesting branch name");
    match (prompter, suggestion) {
        (Some((prompter, terminal)), suggestion) => Ok(editors::edit_branch(
            prompter,
            terminal,
            suggestion.as_deref().unwrap_or(""),
            BRANCH_PLACEHOLDER,
        )?),
        (None, Some(suggestion)) => Ok(BranchName::new(suggestion)?),
        (None, None) => bail!("No branch name given, pass --branch"),
    }
}

/// Initial pull request title.
fn default_title(
    explicit: Option<&str>,
    existing: Option<&PullRequest>,
    commits: &Commits,
    branch: &BranchName,
) -> String {
    if let Some(title) = explicit.map(single_line).filter(|t| !t.is_empty()) {
        return title;
    }
    if let Some(pr) = existing {
        return single_line(&pr.title);
    }
    if commits.len() == 1 {
        return single_line(&commits.first().message);
    }
    branch_name_to_title(branch.as_str())
}

fn generate_body(git: &Git, commits: &Commits, existing: Option<&PullRequest>) -> Result<String> {
    let with_bodies = commits
        .iter()
        .map(|commit| git.commit_with_body(commit))
        .collect::<Result<Vec<_>, _>>()?;
    let generated = format_body(&with_bodies);
    Ok(match existing {
        Some(pr) => replace_marked_section(&pr.body, &generated),
        None => generated,
    })
}

fn find_existing_pr(git: &Git, branch: &BranchName) -> Option<PullRequest> {
    let forge = GhCli::new(git.work_dir());
    match forge.find_pr_by_head(branch.as_str()) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "could not look up existing pull requests");
            None
        }
    }
}

/// Forget the pull request found for the branch when the branch was
/// renamed in the confirmation loop. A new pull request is opened instead.
fn follow_rename(
    mut settings: Settings,
    existing: Option<PullRequest>,
) -> (Settings, Option<PullRequest>) {
    let existing = existing.filter(|pr| pr.head == settings.branch_name.as_str());
    if existing.is_none() {
        settings.update_pr = false;
    }
    (settings, existing)
}

/// Refuse to reset an existing local branch unless overwriting was asked for.
///
/// Checked against the confirmed branch name, which may differ from the
/// one shown when the confirmation loop started.
fn ensure_branch_free(git: &Git, settings: &Settings) -> Result<()> {
    if !settings.overwrite_local_branch && git.branch_exists(&settings.branch_name) {
        bail!(
            "Branch {} already exists, use --overwrite to replace it",
            settings.branch_name
        );
    }
    Ok(())
}

/// Cherry-pick commits onto a new branch, push it and open a PR.
pub fn pick(ctx: &Context, args: PickArgs) -> Result<()> {
    check_dependencies(ctx)?;

    let cwd = ctx.cwd()?;
    let git = Git::open(&cwd)?;
    let config = Config::load(Some(git.common_dir()))?;

    let remotes = git.list_remotes()?;
    let pull_remote = resolve_remote(
        args.pull_remote.as_deref().or(config.pull_remote()),
        &remotes,
        DEFAULT_PULL_REMOTE,
        "--pull-remote",
    )?;
    let push_remote = resolve_remote(
        args.push_remote.as_deref().or(config.push_remote()),
        &remotes,
        DEFAULT_PUSH_REMOTE,
        "--push-remote",
    )?;
    let upstream_branch = resolve_base(&args, &git, &pull_remote, &push_remote, ctx)?;
    let upstream_ref = format!("{pull_remote}/{upstream_branch}");
    tracing::debug!(%pull_remote, %push_remote, %upstream_ref, "resolved base");

    let mut gum = Gum::locate();
    let mut terminal = CrosstermTerminal::new();

    let commits = select_commits(
        &git,
        &args,
        &upstream_ref,
        ctx.interactive.then_some(&mut gum as &mut dyn Prompter),
    )?;
    let branch_name = resolve_branch(
        &args,
        &commits,
        ctx.interactive
            .then_some((&mut gum as &mut dyn Prompter, &mut terminal as &mut dyn TerminalWriter)),
    )?;

    let push = !args.no_push && config.push();
    let pr = push && !args.no_pr && config.pr();
    let existing = if push {
        find_existing_pr(&git, &branch_name)
    } else {
        None
    };
    if let Some(found) = &existing {
        output::print(
            format!("Found pull request #{} for {branch_name}", found.number),
            ctx.verbosity(),
        );
    }

    let settings = Settings {
        push,
        force_push: args.force || existing.is_some(),
        overwrite_local_branch: args.overwrite || existing.is_some(),
        fetch: !args.no_fetch && config.fetch(),
        title: default_title(args.title.as_deref(), existing.as_ref(), &commits, &branch_name),
        body: generate_body(&git, &commits, existing.as_ref())?,
        pr,
        draft_pr: match &existing {
            Some(found) => found.is_draft,
            None => args.draft || config.draft(),
        },
        update_pr: existing.is_some(),
        pull_remote,
        push_remote,
        branch_name,
        upstream_branch,
        commits,
    };
    settings.validate().map_err(|message| anyhow!(message))?;

    let context = ConfirmationContext {
        branch_exists: git.branch_exists(&settings.branch_name),
    };

    let settings = if ctx.interactive {
        let mut keys = CrosstermKeys::new();
        let mut io = ConfirmIo {
            terminal: &mut terminal,
            keys: &mut keys,
            prompter: &mut gum,
            remotes: &git,
        };
        confirm_settings(settings, &context, &mut io)?
    } else {
        settings
    };
    tracing::debug!(?settings, "confirmed settings");
    settings.validate().map_err(|message| anyhow!(message))?;

    let (settings, existing) = follow_rename(settings, existing);
    ensure_branch_free(&git, &settings)?;

    execute::execute(&git, &settings, existing.as_ref(), ctx.verbosity())
}
