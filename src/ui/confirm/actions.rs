//! ui::confirm::actions
//!
//! Keys accepted by the confirmation loop and the settings change each one
//! makes.
//!
//! # Design
//!
//! An [`ActionMap`] is rebuilt from the current [`Settings`] before every
//! key read, so the available keys always follow the settings: `b`, `u`
//! and `return` are always bound, `f` and `p` only while pushing, and `d`,
//! `t` and `e` only while a pull request is enabled. The legend shown
//! under the summary is derived from the same map.
//!
//! Transitions are plain data ([`Action`]) interpreted by
//! [`apply_transition`]. Toggles are pure; the prompting transitions go
//! through the nested editors.

use super::editors;
use super::{ConfirmError, ConfirmIo};
use crate::core::settings::Settings;

/// Boolean setting flipped by a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Pr,
    ForcePush,
    Draft,
}

/// Free-text setting edited in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Branch,
    Title,
    Body,
}

/// Setting chosen from a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    PushRemote,
}

/// What a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Accept the settings and leave the loop
    Confirm,
    Toggle(Flag),
    PromptText(TextField),
    PromptSelection(SelectionField),
}

/// Legend entry: a word with its key letter highlighted in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub before: &'static str,
    pub key: &'static str,
    pub after: &'static str,
}

impl LegendEntry {
    const fn new(before: &'static str, key: &'static str, after: &'static str) -> Self {
        Self { before, key, after }
    }

    /// The entry as plain text, e.g. `push`.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.before, self.key, self.after)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    key: &'static str,
    action: Action,
    legend: Option<LegendEntry>,
}

const FORCE: Binding = Binding {
    key: "f",
    action: Action::Toggle(Flag::ForcePush),
    legend: Some(LegendEntry::new("", "f", "orce")),
};
const PR: Binding = Binding {
    key: "p",
    action: Action::Toggle(Flag::Pr),
    legend: Some(LegendEntry::new("", "p", "r")),
};
const PUSH: Binding = Binding {
    key: "u",
    action: Action::PromptSelection(SelectionField::PushRemote),
    legend: Some(LegendEntry::new("p", "u", "sh")),
};
const BRANCH: Binding = Binding {
    key: "b",
    action: Action::PromptText(TextField::Branch),
    legend: Some(LegendEntry::new("", "b", "ranch")),
};
const DRAFT: Binding = Binding {
    key: "d",
    action: Action::Toggle(Flag::Draft),
    legend: Some(LegendEntry::new("", "d", "raft")),
};
const TITLE: Binding = Binding {
    key: "t",
    action: Action::PromptText(TextField::Title),
    legend: Some(LegendEntry::new("", "t", "itle")),
};
const BODY: Binding = Binding {
    key: "e",
    action: Action::PromptText(TextField::Body),
    legend: Some(LegendEntry::new("", "e", "dit body")),
};
const CONFIRM: Binding = Binding {
    key: "return",
    action: Action::Confirm,
    legend: None,
};

/// Keys bound for one state of the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMap {
    // in legend order
    bindings: Vec<Binding>,
}

impl ActionMap {
    pub fn for_settings(settings: &Settings) -> Self {
        let mut bindings = Vec::with_capacity(8);
        if settings.push {
            bindings.extend([FORCE, PR]);
        }
        bindings.extend([PUSH, BRANCH]);
        if settings.pr {
            bindings.extend([DRAFT, TITLE, BODY]);
        }
        bindings.push(CONFIRM);
        Self { bindings }
    }

    /// The action bound to `key`, or `None` if the key is unhandled.
    pub fn lookup(&self, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.action)
    }

    /// All bound keys.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|binding| binding.key)
    }

    /// Legend entries in display order.
    pub fn legend(&self) -> impl Iterator<Item = LegendEntry> + '_ {
        self.bindings.iter().filter_map(|binding| binding.legend)
    }
}

/// Flip one flag.
pub fn toggle(flag: Flag, settings: &Settings) -> Settings {
    match flag {
        Flag::Pr => Settings {
            pr: !settings.pr,
            ..settings.clone()
        },
        Flag::ForcePush => Settings {
            force_push: !settings.force_push,
            ..settings.clone()
        },
        Flag::Draft => Settings {
            draft_pr: !settings.draft_pr,
            ..settings.clone()
        },
    }
}

/// Compute the settings that follow `action`.
///
/// `max_height` is the number of rows the summary occupied before it was
/// erased; the body editor sizes itself to it.
///
/// # Errors
///
/// [`ConfirmError::Interrupted`] if the user cancelled a nested prompt,
/// in which case the caller keeps `settings` as they were.
pub fn apply_transition(
    action: Action,
    settings: &Settings,
    io: &mut ConfirmIo<'_>,
    max_height: usize,
) -> Result<Settings, ConfirmError> {
    match action {
        Action::Confirm => Ok(settings.clone()),
        Action::Toggle(flag) => Ok(toggle(flag, settings)),
        Action::PromptText(TextField::Branch) => {
            let branch_name = editors::edit_branch(
                &mut *io.prompter,
                &mut *io.terminal,
                settings.branch_name.as_str(),
                "",
            )?;
            Ok(Settings {
                branch_name,
                ..settings.clone()
            })
        }
        Action::PromptText(TextField::Title) => {
            let title = editors::edit_title(
                &mut *io.prompter,
                &mut *io.terminal,
                &settings.commits,
                &settings.branch_name,
                &settings.title,
            )?;
            Ok(Settings {
                title,
                ..settings.clone()
            })
        }
        Action::PromptText(TextField::Body) => {
            let body = editors::edit_body(&mut *io.prompter, &settings.body, max_height)?;
            Ok(Settings {
                body,
                ..settings.clone()
            })
        }
        Action::PromptSelection(SelectionField::PushRemote) => {
            let choice = editors::choose_push_remote(
                &mut *io.prompter,
                &mut *io.terminal,
                io.remotes,
                settings,
            )?;
            match choice {
                None => Ok(Settings {
                    push: false,
                    pr: false,
                    ..settings.clone()
                }),
                Some(push_remote) => Ok(Settings {
                    push: true,
                    push_remote,
                    ..settings.clone()
                }),
            }
        }
    }
}
