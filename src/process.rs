//! process
//!
//! Spawning the external programs pr-cli drives (`git`, `gh`, `gum`).
//!
//! # Modes
//!
//! - [`run`]: all stdio inherited, for commands whose output the user should see
//! - [`capture`]: stdout and stderr captured, stdout returned trimmed
//! - [`capture_interactive`]: stdin and stderr inherited, stdout captured, for
//!   TUI programs that draw on stderr and print their result on stdout
//!
//! Every spawn is logged at debug level.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use thiserror::Error;

/// Exit status shells use for a process ended by Ctrl+C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Errors from spawning or running an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{program} exited with {}{}", describe_code(.code), stderr_suffix(.stderr))]
    Failed {
        program: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} produced invalid UTF-8 output")]
    InvalidOutput { program: String },
}

impl ProcessError {
    /// The program was interrupted by the user (exit code 130).
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            ProcessError::Failed {
                code: Some(INTERRUPTED_EXIT_CODE),
                ..
            }
        )
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

fn command<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    tracing::debug!(command = ?cmd, "spawning");
    cmd
}

fn spawn_error(program: &str, source: std::io::Error) -> ProcessError {
    ProcessError::Spawn {
        program: program.to_string(),
        source,
    }
}

fn check(program: &str, output: Output) -> Result<String, ProcessError> {
    if !output.status.success() {
        return Err(ProcessError::Failed {
            program: program.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    String::from_utf8(output.stdout).map_err(|_| ProcessError::InvalidOutput {
        program: program.to_string(),
    })
}

/// Run a program with inherited stdio, failing on a non-zero exit.
pub fn run<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<(), ProcessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = command(program, args, cwd)
        .status()
        .map_err(|e| spawn_error(program, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Failed {
            program: program.to_string(),
            code: status.code(),
            stderr: String::new(),
        })
    }
}

/// Run a program and return its stdout with surrounding whitespace trimmed.
pub fn capture<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<String, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    check(program, output).map(|stdout| stdout.trim().to_string())
}

/// Run an interactive program and return its stdout untrimmed.
///
/// The terminal stays attached through stdin and stderr.
pub fn capture_interactive<I, S>(
    program: &str,
    args: I,
    cwd: Option<&Path>,
) -> Result<String, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = command(program, args, cwd)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdout(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    check(program, output)
}
