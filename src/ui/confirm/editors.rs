//! ui::confirm::editors
//!
//! Prompts that edit a single setting.
//!
//! Each editor takes the current value and returns the new one. Cancelling
//! the underlying prompt returns [`PromptError::Cancelled`], which the
//! confirmation loop treats as "keep the old value". Editors may write to
//! the terminal (headers, validation errors); the loop measures how far
//! the cursor moved and draws the next summary over that output.

use crossterm::style::{Color, Stylize};

use super::ConfirmError;
use crate::core::naming::{branch_name_to_title, parse_branch_input, single_line};
use crate::core::settings::Settings;
use crate::core::types::{BranchName, Commit, Commits, RemoteName};
use crate::git::{GitError, RemoteSource};
use crate::ui::prompts::{choose_one, InputOptions, PromptError, Prompter, WriteOptions};
use crate::ui::style::{PRIMARY, PRIMARY_DARKER};
use crate::ui::terminal::TerminalWriter;

/// Push remote option meaning "do not push".
pub const DONT_PUSH: &str = "Don't push";

const BRANCH_PROMPT: &str = "Branch name: (Ctrl+U to clear) ";
const TITLE_PROMPT: &str = "Pull request title: ";

/// Lines longer than this are flagged in the body editor.
pub const RECOMMENDED_BODY_WIDTH: usize = 72;
const BODY_INPUT_WIDTH: u16 = 100;
const LINE_NUMBER_WIDTH: u16 = 4;
/// Body editor width including line numbers.
pub const BODY_EDITOR_WIDTH: u16 = BODY_INPUT_WIDTH + LINE_NUMBER_WIDTH;
const MIN_BODY_EDITOR_HEIGHT: usize = 3;

const SATURATED: Color = Color::Rgb {
    r: 0xff,
    g: 0x55,
    b: 0xff,
};

fn write_error(terminal: &mut dyn TerminalWriter, message: &str) -> Result<(), PromptError> {
    terminal.write(&format!("{} {message}\n", "✗".dark_red().bold()))?;
    Ok(())
}

/// Ask for a branch name until a valid one is entered.
pub fn edit_branch(
    prompter: &mut dyn Prompter,
    terminal: &mut dyn TerminalWriter,
    initial: &str,
    placeholder: &str,
) -> Result<BranchName, PromptError> {
    let mut value = initial.to_string();
    loop {
        let input = prompter.input(&InputOptions {
            prompt: BRANCH_PROMPT.to_string(),
            placeholder: placeholder.to_string(),
            value: value.clone(),
        })?;
        match parse_branch_input(&input) {
            Ok(branch) => return Ok(branch),
            Err(message) => {
                tracing::debug!(input = %input, %message, "rejected branch name");
                write_error(terminal, &message)?;
                value = input;
            }
        }
    }
}

enum TitleStrategy<'a> {
    CommitMessage(&'a str),
    PickCommit,
    BranchName(String),
    Manual,
}

impl TitleStrategy<'_> {
    fn label(&self, current: &str) -> String {
        match self {
            TitleStrategy::CommitMessage(message) => {
                format!("🔤  Use commit message: {}", message.grey().dim())
            }
            TitleStrategy::PickCommit => "🗹  Pick a commit".to_string(),
            TitleStrategy::BranchName(title) => {
                format!("🗂  Use the branch name: {}", title.as_str().grey().dim())
            }
            TitleStrategy::Manual if current.is_empty() => "🖮  Write it yourself".to_string(),
            TitleStrategy::Manual => {
                format!("🖮  Edit current title: {}", current.grey().dim())
            }
        }
    }
}

fn commit_label(commit: &Commit) -> String {
    format!("{} {}", commit.sha.as_str().dim(), commit.message)
}

fn write_title(
    prompter: &mut dyn Prompter,
    terminal: &mut dyn TerminalWriter,
    current: &str,
) -> Result<String, PromptError> {
    let mut value = current.to_string();
    loop {
        let title = prompter.input(&InputOptions {
            prompt: TITLE_PROMPT.to_string(),
            placeholder: String::new(),
            value: value.clone(),
        })?;
        let title = single_line(&title);
        if !title.is_empty() {
            return Ok(title);
        }
        write_error(terminal, "Title cannot be empty")?;
        value = title;
    }
}

/// Choose how to set the pull request title, then set it.
pub fn edit_title(
    prompter: &mut dyn Prompter,
    terminal: &mut dyn TerminalWriter,
    commits: &Commits,
    branch_name: &BranchName,
    current: &str,
) -> Result<String, PromptError> {
    let commit_strategy = match commits.as_slice() {
        [only] => TitleStrategy::CommitMessage(&only.message),
        _ => TitleStrategy::PickCommit,
    };
    let strategies = [
        commit_strategy,
        TitleStrategy::BranchName(branch_name_to_title(branch_name.as_str())),
        TitleStrategy::Manual,
    ];
    let selected = (!current.is_empty()).then_some(&strategies[2]);

    let strategy = choose_one(
        prompter,
        &strategies,
        |strategy| strategy.label(current),
        "How do you want to set the pull request title?",
        selected,
    )?;

    match strategy {
        TitleStrategy::CommitMessage(message) => Ok(message.to_string()),
        TitleStrategy::PickCommit => {
            let commit = choose_one(
                prompter,
                commits.as_slice(),
                commit_label,
                "What commit message do you want to use as title?",
                None,
            )?;
            Ok(commit.message.clone())
        }
        TitleStrategy::BranchName(title) => Ok(title.clone()),
        TitleStrategy::Manual => write_title(prompter, terminal, current),
    }
}

/// Header row of the body editor: save instructions, then a marker over
/// the columns past the recommended line width.
pub fn body_header() -> String {
    let title = " Pull request body";
    let save = " (Ctrl+d to save)";
    let padding = RECOMMENDED_BODY_WIDTH.saturating_sub(title.len() + save.len());
    let overflow_width = usize::from(BODY_EDITOR_WIDTH) - usize::from(LINE_NUMBER_WIDTH)
        - RECOMMENDED_BODY_WIDTH;

    format!(
        "{}{}{}{}{}",
        " 📄 ".with(Color::White).on(SATURATED),
        title.with(Color::Black).on(PRIMARY).bold(),
        save.dark_grey().on(PRIMARY),
        " ".repeat(padding).on(PRIMARY),
        format!("{:<overflow_width$}", " ! >72").on(PRIMARY_DARKER),
    )
}

/// Editor height for a summary that occupied `max_height` rows: the rows
/// left after the header row.
pub fn body_editor_height(max_height: usize) -> u16 {
    let height = max_height.saturating_sub(1).max(MIN_BODY_EDITOR_HEIGHT);
    u16::try_from(height).unwrap_or(u16::MAX)
}

/// Edit the pull request body in a multi-line editor.
pub fn edit_body(
    prompter: &mut dyn Prompter,
    current: &str,
    max_height: usize,
) -> Result<String, PromptError> {
    prompter.write(&WriteOptions {
        header: body_header(),
        value: current.to_string(),
        width: BODY_EDITOR_WIDTH,
        height: body_editor_height(max_height),
        show_line_numbers: true,
        show_cursor_line: true,
    })
}

/// Ask where to push. `None` means "do not push".
pub fn choose_push_remote(
    prompter: &mut dyn Prompter,
    terminal: &mut dyn TerminalWriter,
    remotes: &dyn RemoteSource,
    settings: &Settings,
) -> Result<Option<RemoteName>, ConfirmError> {
    let mut options = vec![DONT_PUSH.to_string()];
    options.extend(remotes.list_remotes()?);

    terminal.write(&format!(
        "{}\n",
        " Where should your branch be pushed to? "
            .with(Color::Black)
            .on(PRIMARY)
    ))?;

    let current = if settings.push {
        settings.push_remote.to_string()
    } else {
        DONT_PUSH.to_string()
    };
    let selected = options.iter().find(|option| **option == current);
    let choice = choose_one(prompter, &options, String::clone, "", selected)?;

    if choice == DONT_PUSH {
        return Ok(None);
    }
    RemoteName::new(choice.as_str())
        .map(Some)
        .map_err(|e| ConfirmError::Git(GitError::from(e)))
}
