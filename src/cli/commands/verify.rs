//! verify command - Check that the required programs are installed

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Result};
use crossterm::style::Stylize;

use crate::cli::Context;
use crate::core::paths::PrCliPaths;
use crate::ui::gum::Gum;
use crate::ui::output;
use crate::ui::prompts::Prompter;
use crate::ui::style::visible_width;

/// Programs pr-cli drives.
pub const DEPENDENCIES: [&str; 3] = ["gh", "git", "gum"];

const COLUMN_PADDING: usize = 2;

/// Where a dependency was found, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStatus {
    pub name: &'static str,
    pub path: Option<PathBuf>,
}

impl DependencyStatus {
    pub fn installed(&self) -> bool {
        self.path.is_some()
    }
}

fn locate(name: &str) -> Option<PathBuf> {
    if let Ok(path) = which::which(name) {
        return Some(path);
    }
    if name == "gum" {
        return PrCliPaths::from_home()
            .map(|paths| paths.gum_path())
            .filter(|path| path.is_file());
    }
    None
}

/// Look up every dependency.
pub fn dependency_statuses() -> Vec<DependencyStatus> {
    DEPENDENCIES
        .iter()
        .map(|&name| DependencyStatus {
            name,
            path: locate(name),
        })
        .collect()
}

fn format_table(statuses: &[DependencyStatus]) -> String {
    let rows: Vec<[String; 3]> = statuses
        .iter()
        .map(|status| {
            let (label, path) = match &status.path {
                Some(path) => (
                    "✔ Installed".dark_green().to_string(),
                    path.display().to_string(),
                ),
                None => ("✗ Not installed".dark_red().bold().to_string(), String::new()),
            };
            [status.name.to_string(), label, path]
        })
        .collect();
    let header = [
        "Program".bold().to_string(),
        "Status".bold().to_string(),
        "Path".bold().to_string(),
    ];

    let widths: Vec<usize> = (0..3)
        .map(|column| {
            rows.iter()
                .chain([&header])
                .map(|row| visible_width(&row[column]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut table = String::new();
    for row in [&header].into_iter().chain(rows.iter()) {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            let fill = width - visible_width(cell) + COLUMN_PADDING;
            let _ = write!(line, "{}{cell}{}", " ".repeat(COLUMN_PADDING), " ".repeat(fill));
        }
        table.push_str(line.trim_end());
        table.push('\n');
    }
    table
}

/// Print the status of every dependency.
pub fn verify(ctx: &Context) -> Result<()> {
    let statuses = dependency_statuses();
    output::print(format_table(&statuses).trim_end(), ctx.verbosity());
    if !statuses.iter().all(DependencyStatus::installed) {
        tracing::debug!("not every dependency is installed");
    }
    Ok(())
}

fn confirm_missing(
    statuses: &[DependencyStatus],
    ctx: &Context,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let missing: Vec<&str> = statuses
        .iter()
        .filter(|status| !status.installed())
        .map(|status| status.name)
        .collect();
    if missing.is_empty() {
        tracing::debug!("dependencies met");
        return Ok(());
    }

    eprintln!(
        "{}",
        "✗ Missing dependencies, run 'pr-cli verify' for details"
            .dark_red()
            .bold()
    );
    tracing::debug!(?missing, "missing dependencies");

    if !ctx.interactive {
        output::warn("Continuing with missing dependencies", ctx.verbosity());
        return Ok(());
    }
    if missing.contains(&"gum") {
        bail!("gum is required for interactive use, run 'pr-cli install-deps' to install it");
    }
    if prompter.confirm("Continue with missing dependencies?", false)? {
        tracing::debug!("continuing with missing dependencies");
        Ok(())
    } else {
        bail!("Missing dependencies")
    }
}

/// Warn about missing dependencies and ask whether to go on.
pub fn check_dependencies(ctx: &Context) -> Result<()> {
    confirm_missing(&dependency_statuses(), ctx, &mut Gum::locate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::prompts::{PromptCall, PromptReply, ScriptedPrompter};
    use crate::ui::style::strip_ansi;

    fn statuses(missing: &[&str]) -> Vec<DependencyStatus> {
        DEPENDENCIES
            .iter()
            .map(|&name| DependencyStatus {
                name,
                path: (!missing.contains(&name)).then(|| PathBuf::from(format!("/usr/bin/{name}"))),
            })
            .collect()
    }

    #[test]
    fn table_lists_every_program() {
        let table = format_table(&statuses(&["gum"]));
        let plain = strip_ansi(&table).into_owned();
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Program") && lines[0].contains("Status"));
        assert!(lines[1].contains("gh") && lines[1].contains("✔ Installed"));
        assert!(lines[3].contains("gum") && lines[3].contains("✗ Not installed"));
        // columns line up
        let status_column = lines[0].find("Status").unwrap();
        assert_eq!(lines[1].find('✔'), Some(status_column));
    }

    mod confirm_missing {
        use super::*;

        #[test]
        fn nothing_missing() {
            let mut prompter = ScriptedPrompter::default();
            confirm_missing(&statuses(&[]), &Context::default(), &mut prompter).unwrap();
            assert!(prompter.calls.is_empty());
        }

        #[test]
        fn asks_and_continues() {
            let mut prompter = ScriptedPrompter::new([PromptReply::Confirm(true)]);
            confirm_missing(&statuses(&["gh"]), &Context::default(), &mut prompter).unwrap();
            assert_eq!(
                prompter.calls,
                vec![PromptCall::Confirm {
                    prompt: "Continue with missing dependencies?".into(),
                    default: false,
                }]
            );
        }

        #[test]
        fn declined() {
            let mut prompter = ScriptedPrompter::new([PromptReply::Confirm(false)]);
            assert!(confirm_missing(&statuses(&["gh"]), &Context::default(), &mut prompter).is_err());
        }

        #[test]
        fn missing_gum_cannot_ask() {
            let mut prompter = ScriptedPrompter::default();
            assert!(confirm_missing(&statuses(&["gum"]), &Context::default(), &mut prompter).is_err());
            assert!(prompter.calls.is_empty());
        }

        #[test]
        fn non_interactive_continues() {
            let ctx = Context {
                interactive: false,
                ..Context::default()
            };
            let mut prompter = ScriptedPrompter::default();
            confirm_missing(&statuses(&["gum"]), &ctx, &mut prompter).unwrap();
            assert!(prompter.calls.is_empty());
        }
    }
}
