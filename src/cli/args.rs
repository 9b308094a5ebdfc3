//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// pr-cli - Cherry-pick commits onto a fresh branch and open a pull request
#[derive(Parser, Debug)]
#[command(name = "pr-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if pr-cli was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin and
    ///   stdout are terminals
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cherry-pick commits onto a new branch, push it and open a pull request
    #[command(
        name = "pick",
        visible_alias = "p",
        long_about = "Cherry-pick commits onto a new branch, push it and open a pull request.\n\n\
            Commits are chosen from the ones on your current branch that are not on the \
            base branch. They are applied to a new branch created in a temporary worktree, \
            so your working directory is never touched. Before anything happens, a summary \
            is shown where every setting can be changed with a single key.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Choose commits interactively and open a pull request against the default branch
    pr-cli pick

    # Pick two specific commits onto a branch called fix-login
    pr-cli pick -c 1a2b3c4 -c 5d6e7f8 -b fix-login

    # Push a draft pull request against the release branch
    pr-cli pick --base release --draft

SUMMARY KEYS:
    b  edit branch name       u  choose where to push
    p  toggle pull request    f  toggle force push
    d  toggle draft           t  set title
    e  edit body              Enter  continue"
    )]
    Pick(PickArgs),

    /// Update one of your open pull requests with new commits
    #[command(
        name = "update-pull-request",
        visible_alias = "upr",
        long_about = "Update one of your open pull requests.\n\n\
            Lists the open pull requests you authored, then runs `pick` for the chosen \
            one with its branch, base branch and title, so the branch is rebuilt and \
            force-pushed with the commits you select."
    )]
    UpdatePullRequest,

    /// Create a pull request for the current branch
    #[command(
        name = "pull-request",
        visible_alias = "pr",
        long_about = "Create a pull request for the current branch.\n\n\
            Runs `gh pr create --fill`, taking the title and body from the commits."
    )]
    PullRequest {
        /// Base branch of the pull request
        base: Option<String>,
    },

    /// Check that the required programs are installed
    Verify,

    /// Download gum into ~/.pr-cli/bin
    #[command(name = "install-deps")]
    InstallDeps {
        /// Install even if gum is already on PATH
        #[arg(long)]
        ignore_system: bool,

        /// Reinstall even if the installed version is up to date
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    pr-cli completion bash > ~/.local/share/bash-completion/completions/pr-cli

    # Zsh
    pr-cli completion zsh > \"${fpath[1]}/_pr-cli\"

    # Fish
    pr-cli completion fish > ~/.config/fish/completions/pr-cli.fish

    # PowerShell
    pr-cli completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of `pick`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PickArgs {
    /// Base branch (deprecated, use --base)
    #[arg(value_name = "BASE", hide = true)]
    pub base_positional: Option<String>,

    /// Branch the commits are applied on top of
    #[arg(long)]
    pub base: Option<String>,

    /// Name of the branch to create
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Commits to cherry-pick, skipping the commit chooser
    #[arg(short, long = "commits", value_name = "SHA", num_args = 1..)]
    pub commits: Vec<String>,

    /// Pull request title
    #[arg(long)]
    pub title: Option<String>,

    /// Remote the base branch is taken from
    #[arg(long)]
    pub pull_remote: Option<String>,

    /// Remote the branch is pushed to
    #[arg(long)]
    pub push_remote: Option<String>,

    /// Do not fetch the base branch first
    #[arg(long)]
    pub no_fetch: bool,

    /// Only create the branch locally
    #[arg(long)]
    pub no_push: bool,

    /// Push without opening a pull request
    #[arg(long)]
    pub no_pr: bool,

    /// Open the pull request as a draft
    #[arg(long)]
    pub draft: bool,

    /// Force push the branch
    #[arg(short, long)]
    pub force: bool,

    /// Replace an existing local branch of the same name
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
