//! Running confirmed settings: branch, cherry-pick, push, pull request.
//!
//! All git work happens in a temporary worktree so the user's checkout is
//! never touched. The worktree is removed on every exit path.

use std::path::Path;

use anyhow::{Context as _, Result};
use tempfile::TempDir;

use crate::core::settings::Settings;
use crate::forge::gh::GhCli;
use crate::forge::{CreatePrRequest, Forge, ForgeError, PullRequest, UpdatePrRequest};
use crate::git::{self, BranchMode, Git};
use crate::ui::output::{self, Verbosity};

/// A worktree in a temporary directory, removed when dropped.
struct TemporaryWorktree<'a> {
    git: &'a Git,
    dir: Option<TempDir>,
}

impl<'a> TemporaryWorktree<'a> {
    fn create(
        git: &'a Git,
        settings: &Settings,
        mode: BranchMode,
        verbosity: Verbosity,
    ) -> Result<Self> {
        output::status("Creating temporary directory", verbosity);
        let dir = tempfile::Builder::new()
            .prefix("pr-cli-")
            .tempdir()
            .context("Failed to create temporary directory")?;

        output::status(
            format!("Creating temporary worktree in {}", dir.path().display()),
            verbosity,
        );
        git.worktree_add(
            dir.path(),
            &settings.branch_name,
            &settings.upstream_ref(),
            mode,
        )?;

        Ok(Self {
            git,
            dir: Some(dir),
        })
    }

    fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    fn remove(mut self, verbosity: Verbosity) -> Result<()> {
        output::status("Cleaning up temporary worktree", verbosity);
        if let Some(dir) = self.dir.take() {
            self.git.worktree_remove(dir.path())?;
        }
        Ok(())
    }
}

impl Drop for TemporaryWorktree<'_> {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            tracing::debug!(path = %dir.path().display(), "removing worktree after failure");
            if let Err(e) = self.git.worktree_remove(dir.path()) {
                tracing::warn!(error = %e, path = %dir.path().display(), "failed to remove worktree");
            }
        }
    }
}

/// What [`submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// Create or update the pull request for the pushed branch.
///
/// `existing` is the pull request found for the branch before the
/// confirmation loop, if any. Its draft state is only changed when it
/// differs from the settings.
pub fn submit(
    forge: &dyn Forge,
    settings: &Settings,
    existing: Option<&PullRequest>,
) -> Result<SubmitOutcome, ForgeError> {
    if settings.update_pr {
        forge.update_pr(UpdatePrRequest {
            title: settings.title.clone(),
            body: settings.body.clone(),
            base: Some(settings.upstream_branch.clone()),
        })?;
        if existing.map(|pr| pr.is_draft) != Some(settings.draft_pr) {
            forge.set_draft(settings.draft_pr)?;
        }
        Ok(SubmitOutcome::Updated)
    } else {
        forge.create_pr(CreatePrRequest {
            base: settings.upstream_branch.clone(),
            title: settings.title.clone(),
            body: settings.body.clone(),
            draft: settings.draft_pr,
        })?;
        Ok(SubmitOutcome::Created)
    }
}

/// Run `settings`.
pub fn execute(
    git: &Git,
    settings: &Settings,
    existing: Option<&PullRequest>,
    verbosity: Verbosity,
) -> Result<()> {
    if settings.fetch {
        output::status(format!("Fetching {}", settings.upstream_ref()), verbosity);
        git.fetch(&settings.pull_remote, &settings.upstream_branch)?;
    }

    let mode = if settings.overwrite_local_branch {
        BranchMode::Overwrite
    } else {
        BranchMode::Create
    };
    let worktree = TemporaryWorktree::create(git, settings, mode, verbosity)?;

    output::status("Cherry picking commits", verbosity);
    git::cherry_pick(worktree.path(), settings.commits.as_slice())?;

    if settings.push {
        output::status(format!("Pushing to {}", settings.push_ref()), verbosity);
        git::push(
            worktree.path(),
            &settings.push_remote,
            &settings.branch_name,
            settings.force_push,
        )?;
    }

    if settings.pr {
        let forge = GhCli::new(worktree.path());
        let action = if settings.update_pr {
            "Updating pull request"
        } else {
            "Creating pull request"
        };
        output::status(action, verbosity);
        submit(&forge, settings, existing).context("Failed to submit pull request")?;
    }

    worktree.remove(verbosity)?;
    output::success("Done!", verbosity);
    Ok(())
}
