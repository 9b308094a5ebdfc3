//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Progress and results go to stdout and respect the quiet flag. Warnings
//! and errors go to stderr; errors are always shown.

use std::fmt::Display;

use crossterm::style::{Color, Stylize};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a progress line, e.g. `▶ Cherry picking commits`.
pub fn format_status(message: impl Display) -> String {
    format!("{} {}", "▶".dark_green(), message.to_string().dark_green())
}

/// Print a progress line (respects quiet mode).
pub fn status(message: impl Display, verbosity: Verbosity) {
    print(format_status(message), verbosity);
}

/// Format a success banner.
pub fn format_success(message: impl Display) -> String {
    format!(" ✔ {message} ")
        .with(Color::White)
        .on(Color::DarkGreen)
        .bold()
        .to_string()
}

/// Print a success banner (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    print(format_success(message), verbosity);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{} {}", "!".dark_yellow().bold(), message);
    }
}

/// Format an error banner.
pub fn format_error(message: impl Display) -> String {
    format!(" ❗ {message} ")
        .with(Color::White)
        .on(Color::DarkRed)
        .to_string()
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("{}", format_error(message));
}
