//! ui::confirm::summary
//!
//! Renders the settings summary shown by the confirmation loop.
//!
//! # Layout
//!
//! ```text
//!  ╭──────────────────────────────────────╮
//!  │  ‣ About to cherry pick commits:     │
//!  │    └▷ abc123 Fix bug                 │
//!  │  ‣ Base branch: upstream/main        │
//!  │  ‣ Branch name: origin/fix-bug       │
//!  │  ‣ ✔ push                            │
//!  │  ‣ ✗ pull request                    │
//!  ╰──────────────────────────────────────╯
//!  ╭──────────────────────────────────────╮
//!  │  force | pr | push | branch          │
//!  ╰──────────────────────────────────────╯
//!           Press Enter to continue
//! ```
//!
//! Rendering is a pure function of the settings, the context and the
//! terminal width. The returned line count is exact: the loop erases
//! that many lines before drawing the next summary.

use crossterm::style::{Color, Stylize};

use super::actions::{ActionMap, LegendEntry};
use crate::core::naming::single_line;
use crate::core::settings::{ConfirmationContext, Settings};
use crate::ui::style::{center_offset, primary, visible_width, Block, BLOCK_PADDING};

const BULLET: &str = "‣ ";
const CONTINUE: &str = "Press Enter to continue";

/// Columns kept free between the block and the terminal edges.
const TERMINAL_MARGIN: usize = 4;

/// A rendered summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Text to write. Ends with a space and no newline, so the cursor
    /// rests right after the continue prompt.
    pub text: String,
    /// Number of terminal lines `text` occupies.
    pub line_count: usize,
    /// Lines below the settings block: the legend block and the continue
    /// prompt. Erased when the settings are confirmed.
    pub trailer_line_count: usize,
}

fn check(value: bool) -> String {
    if value {
        "✔".dark_green().to_string()
    } else {
        "✗".dark_red().bold().to_string()
    }
}

fn settings_lines(settings: &Settings, context: &ConfirmationContext) -> Vec<String> {
    let bullet = primary(BULLET).to_string();
    let mut lines = Vec::with_capacity(settings.commits.len() + 5);

    lines.push(format!("{bullet}About to cherry pick commits:"));
    for commit in settings.commits.iter() {
        lines.push(format!(
            "  └▷ {} {}",
            commit.sha.as_str().dark_cyan().dim(),
            single_line(&commit.message).dark_cyan()
        ));
    }

    lines.push(format!(
        "{bullet}Base branch: {}/{}",
        settings.pull_remote.as_str().dark_yellow().dim(),
        settings.upstream_branch.as_str().dark_yellow()
    ));

    let branch = settings.branch_name.as_str().dark_yellow();
    let target = if settings.push {
        format!("{}/{branch}", settings.push_remote.as_str().dark_yellow().dim())
    } else {
        branch.to_string()
    };
    let warning = match (context.branch_exists, settings.overwrite_local_branch) {
        (false, _) => String::new(),
        (true, true) => format!(" {}", "! Overwriting".red()),
        (true, false) => format!(" {}", "! branch exists".dark_red().bold()),
    };
    lines.push(format!("{bullet}Branch name: {target}{warning}"));

    let force = if settings.force_push {
        format!("{} ", "force".dark_red())
    } else {
        String::new()
    };
    lines.push(format!("{bullet}{} {force}push", check(settings.push)));

    let update = settings.pr && settings.update_pr;
    let icon = if update {
        "⟳".dark_blue().to_string()
    } else {
        check(settings.pr)
    };
    let update_label = if update {
        format!("{} ", "update".dark_blue())
    } else {
        String::new()
    };
    let draft = if settings.pr && settings.draft_pr {
        format!("{} ", "draft".dark_grey())
    } else {
        String::new()
    };
    let title = if settings.pr {
        format!(": {}", single_line(&settings.title))
    } else {
        String::new()
    };
    lines.push(format!(
        "{bullet}{icon} {update_label}{draft}pull request{title}"
    ));

    lines
}

fn legend_entry(entry: LegendEntry) -> String {
    let key = entry.key.reverse().bold();
    format!(
        "{}{key}{}",
        entry.before.dark_grey(),
        entry.after.dark_grey()
    )
}

fn legend_line(actions: &ActionMap) -> String {
    let separator = " | ".dark_grey().to_string();
    actions
        .legend()
        .map(legend_entry)
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Render the summary for `settings`.
///
/// # Example
///
/// ```
/// use pr_cli::core::settings::{ConfirmationContext, Settings};
/// use pr_cli::core::types::{BranchName, Commit, Commits, RemoteName};
/// use pr_cli::ui::confirm::render_summary;
///
/// let settings = Settings {
///     push: true,
///     force_push: false,
///     overwrite_local_branch: false,
///     fetch: true,
///     pull_remote: RemoteName::new("upstream").unwrap(),
///     push_remote: RemoteName::new("origin").unwrap(),
///     branch_name: BranchName::new("fix-bug").unwrap(),
///     upstream_branch: "main".into(),
///     commits: Commits::new(vec![Commit::new("abc123", "Fix bug")]).unwrap(),
///     pr: false,
///     draft_pr: false,
///     update_pr: false,
///     title: "Fix bug".into(),
///     body: String::new(),
/// };
/// let summary = render_summary(&settings, &ConfirmationContext::default(), 80);
/// assert_eq!(summary.line_count, summary.text.split('\n').count());
/// assert!(summary.text.ends_with(' '));
/// ```
pub fn render_summary(
    settings: &Settings,
    context: &ConfirmationContext,
    terminal_width: u16,
) -> Summary {
    let lines = settings_lines(settings, context);
    let legend = legend_line(&ActionMap::for_settings(settings));

    let longest = lines
        .iter()
        .chain([&legend])
        .map(|line| visible_width(line))
        .chain([CONTINUE.len()])
        .max()
        .unwrap_or(0);
    let width = (longest + BLOCK_PADDING)
        .min((terminal_width as usize).saturating_sub(TERMINAL_MARGIN));

    let settings_block = Block::new(width).render(&lines);
    let legend_block = Block {
        border: Color::Reset,
        ..Block::new(width)
    }
    .render(&[legend]);

    let block_size = Block::new(width).outer_width();
    let offset = center_offset(block_size, CONTINUE.len());
    let continue_line = format!("{}{}", " ".repeat(offset), primary(CONTINUE).bold());

    let trailer_line_count = legend_block.len() + 1;
    let mut out = settings_block;
    out.extend(legend_block);
    out.push(format!("{continue_line} "));

    Summary {
        line_count: out.len(),
        text: out.join("\n"),
        trailer_line_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::fixtures;
    use crate::core::types::{Commit, Commits};
    use crate::ui::style::strip_ansi;

    fn plain(summary: &Summary) -> String {
        strip_ansi(&summary.text).into_owned()
    }

    fn legend_of(summary: &Summary) -> String {
        let plain = plain(summary);
        let lines: Vec<&str> = plain.split('\n').collect();
        // legend content sits between the legend block borders
        lines[lines.len() - 3].to_string()
    }

    fn assert_count(summary: &Summary) {
        assert_eq!(summary.line_count, summary.text.split('\n').count());
    }

    #[test]
    fn single_commit_scenario() {
        let summary = render_summary(&fixtures::settings(), &ConfirmationContext::default(), 100);
        let text = plain(&summary);
        assert!(text.contains("abc123"));
        assert!(text.contains("Fix bug"));
        assert!(text.contains("About to cherry pick commits:"));
        assert!(text.contains("Base branch: upstream/main"));
        assert!(text.contains("Branch name: origin/fix-bug"));
        assert!(text.contains("✔ push"));
        assert!(text.contains("✗ pull request"));

        let legend = legend_of(&summary);
        for token in ["force", "pr", "push", "branch"] {
            assert!(legend.contains(token), "missing {token} in {legend}");
        }
        for token in ["draft", "title", "edit body"] {
            assert!(!legend.contains(token), "unexpected {token} in {legend}");
        }
        assert_count(&summary);
        // 1 commit + 5 setting lines + 2 borders, legend block, continue line
        assert_eq!(summary.line_count, 8 + 3 + 1);
        assert_eq!(summary.trailer_line_count, 4);
    }

    #[test]
    fn multiple_commits() {
        let settings = Settings {
            commits: Commits::new(vec![
                Commit::new("aaa111", "First"),
                Commit::new("bbb222", "Second"),
                Commit::new("ccc333", "Third"),
            ])
            .unwrap(),
            ..fixtures::settings()
        };
        let summary = render_summary(&settings, &ConfirmationContext::default(), 100);
        let text = plain(&summary);
        let first = text.find("aaa111 First").unwrap();
        let third = text.find("ccc333 Third").unwrap();
        assert!(first < third);
        assert_count(&summary);
        assert_eq!(summary.line_count, 10 + 3 + 1);
    }

    #[test]
    fn push_disabled() {
        let settings = Settings {
            push: false,
            ..fixtures::settings()
        };
        let summary = render_summary(&settings, &ConfirmationContext::default(), 100);
        let text = plain(&summary);
        assert!(text.contains("Branch name: fix-bug"));
        assert!(text.contains("✗ push"));
        let legend = legend_of(&summary);
        assert!(!legend.contains("force"));
        assert!(legend.contains("push | branch"));
        assert_count(&summary);
    }

    #[test]
    fn draft_pull_request() {
        let settings = Settings {
            draft_pr: true,
            force_push: true,
            ..fixtures::with_pr()
        };
        let summary = render_summary(&settings, &ConfirmationContext::default(), 100);
        let text = plain(&summary);
        assert!(text.contains("✔ force push"));
        assert!(text.contains("✔ draft pull request: Fix bug"));
        assert_eq!(
            legend_of(&summary).trim().trim_matches('│').trim(),
            "force | pr | push | branch | draft | title | edit body"
        );
        assert_count(&summary);
    }

    #[test]
    fn updated_pull_request() {
        let settings = Settings {
            update_pr: true,
            ..fixtures::with_pr()
        };
        let summary = render_summary(&settings, &ConfirmationContext::default(), 100);
        assert!(plain(&summary).contains("⟳ update pull request: Fix bug"));
        assert_count(&summary);
    }

    #[test]
    fn draft_hidden_without_pr() {
        let settings = Settings {
            draft_pr: true,
            update_pr: true,
            ..fixtures::settings()
        };
        let text = plain(&render_summary(&settings, &ConfirmationContext::default(), 100));
        assert!(text.contains("✗ pull request"));
        assert!(!text.contains("draft"));
        assert!(!text.contains("update"));
    }

    mod branch_warning {
        use super::*;

        const EXISTS: ConfirmationContext = ConfirmationContext {
            branch_exists: true,
        };

        #[test]
        fn exists() {
            let text = plain(&render_summary(&fixtures::settings(), &EXISTS, 100));
            assert!(text.contains("origin/fix-bug ! branch exists"));
        }

        #[test]
        fn overwriting() {
            let settings = Settings {
                overwrite_local_branch: true,
                ..fixtures::settings()
            };
            let text = plain(&render_summary(&settings, &EXISTS, 100));
            assert!(text.contains("origin/fix-bug ! Overwriting"));
        }

        #[test]
        fn overwrite_without_existing_branch() {
            let settings = Settings {
                overwrite_local_branch: true,
                ..fixtures::settings()
            };
            let text = plain(&render_summary(&settings, &ConfirmationContext::default(), 100));
            assert!(!text.contains('!'));
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn blocks_share_width() {
            let summary = render_summary(&fixtures::with_pr(), &ConfirmationContext::default(), 120);
            let text = plain(&summary);
            let lines: Vec<&str> = text.split('\n').collect();
            let border = visible_width(lines[0]);
            for line in &lines[..lines.len() - 1] {
                assert_eq!(visible_width(line), border, "{line:?}");
            }
        }

        #[test]
        fn continue_line_is_centered() {
            let summary = render_summary(&fixtures::settings(), &ConfirmationContext::default(), 120);
            let text = plain(&summary);
            let last = text.rsplit('\n').next().unwrap();
            let first = text.split('\n').next().unwrap();
            assert!(last.ends_with("Press Enter to continue "));
            let indent = last.len() - last.trim_start().len();
            let outer = visible_width(first) + 1;
            assert_eq!(indent, center_offset(outer, CONTINUE.len()));
        }

        #[test]
        fn no_trailing_newline() {
            let summary = render_summary(&fixtures::settings(), &ConfirmationContext::default(), 80);
            assert!(summary.text.ends_with(' '));
            assert!(!summary.text.ends_with('\n'));
        }

        #[test]
        fn narrow_terminal_wraps_and_counts() {
            let settings = Settings {
                commits: Commits::new(vec![Commit::new(
                    "abc123",
                    "A commit message that is much longer than the terminal is wide",
                )])
                .unwrap(),
                ..fixtures::with_pr()
            };
            let summary = render_summary(&settings, &ConfirmationContext::default(), 30);
            assert_count(&summary);
            assert!(summary.trailer_line_count > 4);
            let text = plain(&summary);
            for line in text.split('\n') {
                assert!(visible_width(line) <= 30, "{line:?}");
            }
        }

        #[test]
        fn tiny_terminal_does_not_panic() {
            let summary = render_summary(&fixtures::with_pr(), &ConfirmationContext::default(), 2);
            assert_count(&summary);
        }
    }
}
