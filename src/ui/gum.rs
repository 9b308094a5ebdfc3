//! ui::gum
//!
//! [`Prompter`] implementation driving the `gum` CLI.
//!
//! `gum` draws its interface on stderr and prints the result on stdout,
//! so every call runs with the terminal attached and stdout captured.
//! Exit status 130 (Ctrl+C inside gum) becomes [`PromptError::Cancelled`].

use std::path::PathBuf;

use super::prompts::{ChooseOptions, InputOptions, PromptError, Prompter, WriteOptions};
use super::style::{PRIMARY_DARKER_HEX, PRIMARY_HEX};
use crate::core::paths::PrCliPaths;
use crate::process::{self, ProcessError};

/// The `gum` program.
#[derive(Debug, Clone)]
pub struct Gum {
    program: PathBuf,
}

impl Gum {
    /// Use a specific `gum` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Prefer the copy installed by `install-deps`, then `gum` on `PATH`.
    pub fn locate() -> Self {
        let installed = PrCliPaths::from_home()
            .map(|paths| paths.gum_path())
            .filter(|path| path.is_file());
        Self::new(installed.unwrap_or_else(|| PathBuf::from("gum")))
    }

    fn capture(&self, args: Vec<String>) -> Result<String, PromptError> {
        let program = self.program.to_string_lossy();
        Ok(process::capture_interactive(&program, args, None)?)
    }
}

fn input_args(options: &InputOptions) -> Vec<String> {
    let mut args = vec!["input".to_string(), "--width=80".to_string()];
    if !options.placeholder.is_empty() {
        args.push(format!("--placeholder={}", options.placeholder));
    }
    if !options.prompt.is_empty() {
        args.push(format!("--prompt={}", options.prompt));
    }
    if !options.value.is_empty() {
        args.push(format!("--value={}", options.value));
    }
    args
}

fn choose_args(items: &[String], options: &ChooseOptions) -> Vec<String> {
    let mut args = vec!["choose".to_string()];
    args.push(if options.multiple {
        "--no-limit".to_string()
    } else {
        "--limit=1".to_string()
    });
    if !options.header.is_empty() {
        args.push(format!("--header={}", options.header));
    }
    // gum splits flag values on unescaped commas
    args.extend(
        options
            .selected
            .iter()
            .map(|item| format!("--selected={}", item.replace(',', "\\,"))),
    );
    args.push("--".to_string());
    args.extend(items.iter().cloned());
    args
}

fn write_args(options: &WriteOptions) -> Vec<String> {
    let mut args = vec![
        "write".to_string(),
        // gum defaults to a 400 character limit
        "--char-limit=0".to_string(),
        format!("--line-number.foreground={PRIMARY_HEX}"),
        format!("--cursor-line-number.foreground={PRIMARY_HEX}"),
        "--cursor-line-number.bold".to_string(),
        format!("--prompt.foreground={PRIMARY_HEX}"),
        format!("--end-of-buffer.foreground={PRIMARY_DARKER_HEX}"),
        "--base.margin=0 0 0 1".to_string(),
        "--prompt=".to_string(),
    ];
    if options.width > 0 {
        args.push(format!("--width={}", options.width));
    }
    if options.height > 0 {
        args.push(format!("--height={}", options.height));
    }
    args.push(format!("--header={}", options.header));
    args.push(format!("--value={}", options.value));
    if options.show_cursor_line {
        args.push("--show-cursor-line".to_string());
    }
    if options.show_line_numbers {
        args.push("--show-line-numbers".to_string());
    }
    args
}

fn confirm_args(prompt: &str, default: bool) -> Vec<String> {
    vec![
        "confirm".to_string(),
        prompt.to_string(),
        format!("--default={default}"),
    ]
}

impl Prompter for Gum {
    fn input(&mut self, options: &InputOptions) -> Result<String, PromptError> {
        let output = self.capture(input_args(options))?;
        Ok(output.trim_end_matches(['\r', '\n']).to_string())
    }

    fn choose(
        &mut self,
        items: &[String],
        options: &ChooseOptions,
    ) -> Result<Vec<String>, PromptError> {
        let output = self.capture(choose_args(items, options))?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn write(&mut self, options: &WriteOptions) -> Result<String, PromptError> {
        let output = self.capture(write_args(options))?;
        Ok(output.trim_end_matches('\n').to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let program = self.program.to_string_lossy();
        match process::run(&program, confirm_args(prompt, default), None) {
            Ok(()) => Ok(true),
            Err(ProcessError::Failed { code: Some(1), .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
