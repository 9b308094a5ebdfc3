//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts go through the [`Prompter`] trait so that commands and the
//! confirmation loop never depend on a particular prompt program. The
//! production implementation is [`crate::ui::gum::Gum`]; tests use
//! [`ScriptedPrompter`].
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use super::style::strip_ansi;
use crate::process::ProcessError;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),

    #[error("prompt failed: {0}")]
    Failed(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

impl From<ProcessError> for PromptError {
    fn from(err: ProcessError) -> Self {
        if err.is_interrupted() {
            PromptError::Cancelled
        } else {
            PromptError::Failed(err.to_string())
        }
    }
}

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOptions {
    pub prompt: String,
    pub placeholder: String,
    /// Initial value
    pub value: String,
}

/// Choice from a list of options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChooseOptions {
    pub header: String,
    /// Options to pre-select
    pub selected: Vec<String>,
    /// Allow choosing any number of options
    pub multiple: bool,
}

/// Multi-line editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub header: String,
    /// Initial value
    pub value: String,
    pub width: u16,
    pub height: u16,
    pub show_line_numbers: bool,
    pub show_cursor_line: bool,
}

/// Interactive prompt collaborator.
pub trait Prompter {
    /// Read one line of text.
    fn input(&mut self, options: &InputOptions) -> Result<String, PromptError>;

    /// Choose among `items`, returning the chosen items as shown.
    fn choose(
        &mut self,
        items: &[String],
        options: &ChooseOptions,
    ) -> Result<Vec<String>, PromptError>;

    /// Edit multi-line text.
    fn write(&mut self, options: &WriteOptions) -> Result<String, PromptError>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// Labels keyed by their unstyled text, so that a chooser may echo the
/// choice back with or without color.
fn label_index(labels: &[String]) -> Result<HashMap<String, usize>, PromptError> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(strip_ansi(label).into_owned(), i).is_some() {
            return Err(PromptError::Failed("options must be unique".into()));
        }
    }
    Ok(index)
}

fn choose_indices(
    prompter: &mut dyn Prompter,
    labels: &[String],
    options: &ChooseOptions,
) -> Result<Vec<usize>, PromptError> {
    let index = label_index(labels)?;
    prompter
        .choose(labels, options)?
        .iter()
        .filter(|chosen| !chosen.is_empty())
        .map(|chosen| {
            index
                .get(&*strip_ansi(chosen))
                .copied()
                .ok_or_else(|| PromptError::Failed(format!("unexpected choice: {chosen}")))
        })
        .collect()
}

/// Choose exactly one of `items`, each shown as `format(item)`.
pub fn choose_one<'a, T>(
    prompter: &mut dyn Prompter,
    items: &'a [T],
    format: impl Fn(&T) -> String,
    header: &str,
    selected: Option<&T>,
) -> Result<&'a T, PromptError> {
    let labels: Vec<String> = items.iter().map(&format).collect();
    let options = ChooseOptions {
        header: header.to_string(),
        selected: selected.map(&format).into_iter().collect(),
        multiple: false,
    };

    match choose_indices(prompter, &labels, &options)?.as_slice() {
        [i] => Ok(&items[*i]),
        [] => Err(PromptError::Cancelled),
        more => Err(PromptError::Failed(format!(
            "{} options returned when only 1 was expected",
            more.len()
        ))),
    }
}

/// Choose any number of `items`, returned in their original order.
pub fn choose_many<'a, T>(
    prompter: &mut dyn Prompter,
    items: &'a [T],
    format: impl Fn(&T) -> String,
    header: &str,
) -> Result<Vec<&'a T>, PromptError> {
    let labels: Vec<String> = items.iter().map(format).collect();
    let options = ChooseOptions {
        header: header.to_string(),
        selected: Vec::new(),
        multiple: true,
    };

    let mut chosen = choose_indices(prompter, &labels, &options)?;
    chosen.sort_unstable();
    chosen.dedup();
    Ok(chosen.into_iter().map(|i| &items[i]).collect())
}

/// One prompt call recorded by [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Input(InputOptions),
    Choose {
        items: Vec<String>,
        options: ChooseOptions,
    },
    Write(WriteOptions),
    Confirm { prompt: String, default: bool },
}

/// Scripted answer for [`ScriptedPrompter`].
#[derive(Debug)]
pub enum PromptReply {
    /// Answer for `input` or `write`
    Text(String),
    /// Answer for `choose`: each entry picks the first item whose unstyled
    /// label contains it
    Choose(Vec<String>),
    Confirm(bool),
    /// Fail the call
    Error(PromptError),
}

impl PromptReply {
    pub fn text(text: impl Into<String>) -> Self {
        PromptReply::Text(text.into())
    }

    pub fn choose(fragment: impl Into<String>) -> Self {
        PromptReply::Choose(vec![fragment.into()])
    }

    pub fn cancel() -> Self {
        PromptReply::Error(PromptError::Cancelled)
    }
}

/// [`Prompter`] answering from a script, for tests.
///
/// Records every call. An exhausted script, or a reply of the wrong kind,
/// fails the call.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<PromptReply>,
    pub calls: Vec<PromptCall>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = PromptReply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next(&mut self, call: PromptCall) -> Result<PromptReply, PromptError> {
        let kind = format!("{call:?}");
        self.calls.push(call);
        match self.replies.pop_front() {
            Some(PromptReply::Error(e)) => Err(e),
            Some(reply) => Ok(reply),
            None => Err(PromptError::Failed(format!("no scripted reply for {kind}"))),
        }
    }
}

fn unexpected(reply: PromptReply) -> PromptError {
    PromptError::Failed(format!("unexpected scripted reply {reply:?}"))
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, options: &InputOptions) -> Result<String, PromptError> {
        match self.next(PromptCall::Input(options.clone()))? {
            PromptReply::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }

    fn choose(
        &mut self,
        items: &[String],
        options: &ChooseOptions,
    ) -> Result<Vec<String>, PromptError> {
        let reply = self.next(PromptCall::Choose {
            items: items.to_vec(),
            options: options.clone(),
        })?;
        let fragments = match reply {
            PromptReply::Choose(fragments) => fragments,
            other => return Err(unexpected(other)),
        };

        fragments
            .iter()
            .map(|fragment| {
                items
                    .iter()
                    .find(|item| strip_ansi(item).contains(fragment.as_str()))
                    .cloned()
                    .ok_or_else(|| PromptError::Failed(format!("no option matches {fragment:?}")))
            })
            .collect()
    }

    fn write(&mut self, options: &WriteOptions) -> Result<String, PromptError> {
        match self.next(PromptCall::Write(options.clone()))? {
            PromptReply::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        match self.next(PromptCall::Confirm {
            prompt: prompt.to_string(),
            default,
        })? {
            PromptReply::Confirm(answer) => Ok(answer),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Stylize;

    #[test]
    fn interrupted_process_is_cancellation() {
        let err: PromptError = ProcessError::Failed {
            program: "gum".into(),
            code: Some(130),
            stderr: String::new(),
        }
        .into();
        assert!(matches!(err, PromptError::Cancelled));
    }

    mod choose_one {
        use super::*;

        #[test]
        fn maps_styled_labels_back() {
            let items = ["upstream", "origin"];
            let mut prompter = ScriptedPrompter::new([PromptReply::choose("origin")]);
            let chosen = choose_one(
                &mut prompter,
                &items,
                |s| s.cyan().to_string(),
                "Pick",
                Some(&"upstream"),
            )
            .unwrap();
            assert_eq!(*chosen, "origin");

            let PromptCall::Choose { options, .. } = &prompter.calls[0] else {
                panic!("expected a choose call");
            };
            assert_eq!(options.header, "Pick");
            assert_eq!(strip_ansi(&options.selected[0]), "upstream");
            assert!(!options.multiple);
        }

        #[test]
        fn duplicate_labels_rejected() {
            let items = ["a", "a"];
            let mut prompter = ScriptedPrompter::new([PromptReply::choose("a")]);
            assert!(matches!(
                choose_one(&mut prompter, &items, |s| s.to_string(), "", None),
                Err(PromptError::Failed(_))
            ));
        }

        #[test]
        fn cancellation_propagates() {
            let items = ["a"];
            let mut prompter = ScriptedPrompter::new([PromptReply::cancel()]);
            assert!(matches!(
                choose_one(&mut prompter, &items, |s| s.to_string(), "", None),
                Err(PromptError::Cancelled)
            ));
        }
    }

    mod choose_many {
        use super::*;

        #[test]
        fn keeps_original_order() {
            let items = ["one", "two", "three"];
            let mut prompter = ScriptedPrompter::new([PromptReply::Choose(vec![
                "three".into(),
                "one".into(),
            ])]);
            let chosen = choose_many(&mut prompter, &items, |s| s.to_string(), "").unwrap();
            assert_eq!(chosen, vec![&"one", &"three"]);
        }

        #[test]
        fn nothing_chosen_is_empty() {
            let items = ["one"];
            let mut prompter = ScriptedPrompter::new([PromptReply::Choose(vec![])]);
            assert!(choose_many(&mut prompter, &items, |s| s.to_string(), "")
                .unwrap()
                .is_empty());
        }
    }

    #[test]
    fn exhausted_script_fails() {
        let mut prompter = ScriptedPrompter::default();
        assert!(matches!(
            prompter.input(&InputOptions::default()),
            Err(PromptError::Failed(_))
        ));
        assert_eq!(prompter.calls.len(), 1);
    }
}
