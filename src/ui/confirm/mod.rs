//! ui::confirm
//!
//! Interactive confirmation of [`Settings`] before anything is executed.
//!
//! # Protocol
//!
//! 1. Render the summary and remember how many lines it took.
//! 2. Read one key.
//! 3. `return` erases the legend and the continue prompt and returns the
//!    settings.
//! 4. A key with no binding is ignored; nothing is erased or redrawn.
//! 5. Any other key erases the summary, runs its transition and moves the
//!    cursor back up over whatever the transition printed, then goes back
//!    to 1.
//!
//! Cancelling a nested prompt (Ctrl+C, or `gum` exiting with status 130)
//! discards that one edit. Ctrl+C while waiting for a key aborts the whole
//! loop with [`ConfirmError::Interrupted`].
//!
//! # Example
//!
//! ```
//! use pr_cli::core::settings::{ConfirmationContext, Settings};
//! use pr_cli::core::types::{BranchName, Commit, Commits, RemoteName};
//! use pr_cli::git::{GitError, RemoteSource};
//! use pr_cli::ui::confirm::{confirm_settings, ConfirmIo};
//! use pr_cli::ui::keys::ScriptedKeys;
//! use pr_cli::ui::prompts::ScriptedPrompter;
//! use pr_cli::ui::terminal::RecordingTerminal;
//!
//! struct NoRemotes;
//! impl RemoteSource for NoRemotes {
//!     fn list_remotes(&self) -> Result<Vec<String>, GitError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let settings = Settings {
//!     push: true,
//!     force_push: false,
//!     overwrite_local_branch: false,
//!     fetch: true,
//!     pull_remote: RemoteName::new("upstream").unwrap(),
//!     push_remote: RemoteName::new("origin").unwrap(),
//!     branch_name: BranchName::new("fix-bug").unwrap(),
//!     upstream_branch: "main".into(),
//!     commits: Commits::new(vec![Commit::new("abc123", "Fix bug")]).unwrap(),
//!     pr: false,
//!     draft_pr: false,
//!     update_pr: false,
//!     title: "Fix bug".into(),
//!     body: String::new(),
//! };
//!
//! let mut terminal = RecordingTerminal::new(80, 24);
//! let mut keys = ScriptedKeys::new(["f", "return"]);
//! let mut prompter = ScriptedPrompter::default();
//! let mut io = ConfirmIo {
//!     terminal: &mut terminal,
//!     keys: &mut keys,
//!     prompter: &mut prompter,
//!     remotes: &NoRemotes,
//! };
//!
//! let confirmed = confirm_settings(settings, &ConfirmationContext::default(), &mut io).unwrap();
//! assert!(confirmed.force_push);
//! ```

mod actions;
pub mod editors;
mod summary;

use std::io;

use thiserror::Error;

pub use actions::{
    apply_transition, toggle, Action, ActionMap, Flag, LegendEntry, SelectionField, TextField,
};
pub use summary::{render_summary, Summary};

use crate::core::settings::{ConfirmationContext, Settings};
use crate::git::{GitError, RemoteSource};
use crate::ui::keys::KeySource;
use crate::ui::prompts::{PromptError, Prompter};
use crate::ui::terminal::TerminalWriter;

/// Errors from the confirmation loop.
#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error("interrupted by user")]
    Interrupted,

    #[error(transparent)]
    Prompt(PromptError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl From<PromptError> for ConfirmError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => ConfirmError::Interrupted,
            other => ConfirmError::Prompt(other),
        }
    }
}

/// Everything the loop talks to.
pub struct ConfirmIo<'a> {
    pub terminal: &'a mut dyn TerminalWriter,
    pub keys: &'a mut dyn KeySource,
    pub prompter: &'a mut dyn Prompter,
    pub remotes: &'a dyn RemoteSource,
}

fn print_summary(
    settings: &Settings,
    context: &ConfirmationContext,
    terminal: &mut dyn TerminalWriter,
) -> Result<Summary, ConfirmError> {
    let (columns, _) = terminal.size()?;
    let summary = render_summary(settings, context, columns);
    terminal.write(&summary.text)?;
    Ok(summary)
}

/// Let the user review and edit `settings` until they press Enter.
///
/// # Errors
///
/// - [`ConfirmError::Interrupted`] if Ctrl+C was pressed at the summary
/// - any other prompt, terminal or git failure
pub fn confirm_settings(
    settings: Settings,
    context: &ConfirmationContext,
    io: &mut ConfirmIo<'_>,
) -> Result<Settings, ConfirmError> {
    let mut settings = settings;
    let mut summary = print_summary(&settings, context, io.terminal)?;

    loop {
        let key = match io.keys.read_key() {
            Ok(key) => key,
            Err(err) => {
                // leave the shell prompt on a line of its own
                io.terminal.write("\n")?;
                return Err(err.into());
            }
        };

        let Some(action) = ActionMap::for_settings(&settings).lookup(&key) else {
            tracing::trace!(key = %key, "unhandled key");
            continue;
        };

        if action == Action::Confirm {
            io.terminal.erase_lines(summary.trailer_line_count)?;
            return Ok(settings);
        }

        io.terminal.erase_lines(summary.line_count)?;
        let before = io.terminal.cursor_row()?;

        let (_, rows) = io.terminal.size()?;
        let max_height = summary.line_count.min(usize::from(rows));
        match apply_transition(action, &settings, io, max_height) {
            Ok(next) => settings = next,
            Err(ConfirmError::Interrupted) => {
                tracing::debug!(?action, "edit cancelled");
            }
            Err(err) => return Err(err),
        }

        let now = io.terminal.cursor_row()?;
        if now > before {
            io.terminal.move_cursor_up(now - before)?;
            io.terminal.clear_below()?;
        }

        summary = print_summary(&settings, context, io.terminal)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::fixtures;
    use crate::ui::keys::ScriptedKeys;
    use crate::ui::prompts::{PromptReply, ScriptedPrompter};
    use crate::ui::terminal::{RecordingTerminal, TerminalOp};

    struct Remotes;

    impl RemoteSource for Remotes {
        fn list_remotes(&self) -> Result<Vec<String>, GitError> {
            Ok(vec!["origin".into(), "upstream".into()])
        }
    }

    fn run(
        settings: Settings,
        keys: ScriptedKeys,
        replies: Vec<PromptReply>,
    ) -> (Result<Settings, ConfirmError>, RecordingTerminal) {
        let mut terminal = RecordingTerminal::new(100, 40);
        let mut keys = keys;
        let mut prompter = ScriptedPrompter::new(replies);
        let result = confirm_settings(
            settings,
            &ConfirmationContext::default(),
            &mut ConfirmIo {
                terminal: &mut terminal,
                keys: &mut keys,
                prompter: &mut prompter,
                remotes: &Remotes,
            },
        );
        (result, terminal)
    }

    #[test]
    fn enter_confirms_unchanged() {
        let (result, terminal) = run(fixtures::settings(), ScriptedKeys::new(["return"]), vec![]);
        assert_eq!(result.unwrap(), fixtures::settings());
        assert_eq!(terminal.erasures(), vec![4]);
        assert_eq!(terminal.writes().len(), 1);
    }

    #[test]
    fn toggle_erases_and_redraws() {
        let initial = render_summary(&fixtures::settings(), &ConfirmationContext::default(), 100);
        let (result, terminal) = run(
            fixtures::settings(),
            ScriptedKeys::new(["p", "return"]),
            vec![],
        );
        assert!(result.unwrap().pr);
        assert_eq!(terminal.erasures(), vec![initial.line_count, 4]);
        assert_eq!(terminal.writes().len(), 2);
    }

    #[test]
    fn unhandled_keys_do_nothing() {
        let (result, terminal) = run(
            fixtures::settings(),
            ScriptedKeys::new(["x", "d", "ctrl+b", "return"]),
            vec![],
        );
        assert_eq!(result.unwrap(), fixtures::settings());
        assert_eq!(terminal.erasures(), vec![4]);
    }

    #[test]
    fn top_level_cancel_is_interrupted() {
        let (result, terminal) = run(
            fixtures::settings(),
            ScriptedKeys::new(["f"]).then_cancel(),
            vec![],
        );
        assert!(matches!(result, Err(ConfirmError::Interrupted)));
        assert_eq!(terminal.writes().last(), Some(&"\n"));
    }

    #[test]
    fn cancelled_edit_keeps_settings() {
        let (result, _) = run(
            fixtures::settings(),
            ScriptedKeys::new(["b", "return"]),
            vec![PromptReply::cancel()],
        );
        assert_eq!(result.unwrap(), fixtures::settings());
    }

    #[test]
    fn prompt_failure_aborts() {
        let (result, _) = run(
            fixtures::settings(),
            ScriptedKeys::new(["b", "return"]),
            vec![PromptReply::Error(PromptError::Failed("gum not found".into()))],
        );
        assert!(matches!(result, Err(ConfirmError::Prompt(PromptError::Failed(_)))));
    }

    #[test]
    fn transition_output_is_overwritten() {
        let (result, terminal) = run(
            fixtures::settings(),
            ScriptedKeys::new(["u", "return"]),
            vec![PromptReply::choose("upstream")],
        );
        assert_eq!(result.unwrap().push_remote.as_str(), "upstream");
        // the push header printed one line
        assert!(terminal.ops.contains(&TerminalOp::MoveCursorUp(1)));
    }

    #[test]
    fn body_editor_sized_to_summary() {
        let initial = render_summary(&fixtures::with_pr(), &ConfirmationContext::default(), 100);
        let mut terminal = RecordingTerminal::new(100, 40);
        let mut keys = ScriptedKeys::new(["e", "return"]);
        let mut prompter = ScriptedPrompter::new([PromptReply::text("body")]);
        let result = confirm_settings(
            fixtures::with_pr(),
            &ConfirmationContext::default(),
            &mut ConfirmIo {
                terminal: &mut terminal,
                keys: &mut keys,
                prompter: &mut prompter,
                remotes: &Remotes,
            },
        );
        assert_eq!(result.unwrap().body, "body");
        let crate::ui::prompts::PromptCall::Write(options) = &prompter.calls[0] else {
            panic!("expected write");
        };
        assert_eq!(usize::from(options.height), initial.line_count - 1);
    }
}
