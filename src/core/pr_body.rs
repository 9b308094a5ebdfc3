//! core::pr_body
//!
//! Pull request body generation.
//!
//! The generated part of a body is wrapped in HTML comment markers so that a
//! later update can replace it while keeping anything the author wrote
//! around it.

use super::types::CommitWithBody;

pub const START_MARKER: &str = "<!-- pr-cli body start -->";
pub const REPLACEMENT_EXPLANATION: &str =
    "<!-- Anything between the start and end tags will be replaced when updating a PR -->";
pub const END_MARKER: &str = "<!-- pr-cli body end -->";

const COMMIT_SEPARATOR: &str = "\n\n<br>\n\n";

/// Format commits into a marked pull request body.
///
/// Each commit becomes a `#### <subject>` heading followed by its body, if it
/// has one.
pub fn format_body(commits: &[CommitWithBody]) -> String {
    let sections = commits
        .iter()
        .map(|commit| {
            let heading = format!("#### {}", commit.message);
            if commit.body.trim().is_empty() {
                heading
            } else {
                format!("{heading}\n\n{}", commit.body)
            }
        })
        .collect::<Vec<_>>()
        .join(COMMIT_SEPARATOR);

    [START_MARKER, REPLACEMENT_EXPLANATION, &sections, END_MARKER].join("\n")
}

/// Replace the marked section of `current` with `replacement`.
///
/// Text before the start marker and after the end marker is kept. Without
/// markers the whole body is replaced.
pub fn replace_marked_section(current: &str, replacement: &str) -> String {
    let mut body = String::new();

    let start = current.find(START_MARKER);
    if let Some(start) = start.filter(|&s| s > 0) {
        body.push_str(&current[..start]);
    }

    body.push_str(replacement);

    let search_from = start.unwrap_or(0);
    if let Some(end) = current[search_from..]
        .find(END_MARKER)
        .map(|offset| offset + search_from)
        .filter(|&e| e > 0)
    {
        body.push_str(&current[end + END_MARKER.len()..]);
    }

    body
}
