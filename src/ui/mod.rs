//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`confirm`] - Interactive review of the settings before execution
//! - [`keys`] - Single-keypress reading
//! - [`prompts`] - Prompt abstraction and choice helpers
//! - [`gum`] - Prompts backed by the `gum` program
//! - [`terminal`] - Cursor control for in-place redraws
//! - [`style`] - Colors, measurement and bordered blocks
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Terminal, keyboard and prompt access all go through traits
//! ([`terminal::TerminalWriter`], [`keys::KeySource`], [`prompts::Prompter`])
//! so the confirmation loop runs unchanged against scripted fakes in tests.

pub mod confirm;
pub mod gum;
pub mod keys;
pub mod output;
pub mod prompts;
pub mod style;
pub mod terminal;
