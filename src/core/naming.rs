//! core::naming
//!
//! Branch naming rules and conversions.
//!
//! # Features
//!
//! - Suggest a branch name from a commit message
//! - Turn a branch name back into a human readable pull request title
//! - Validate branch names typed by the user
//! - Keep titles on a single line

use super::types::BranchName;

/// Shortest branch name accepted from user input.
pub const MIN_BRANCH_NAME_LEN: usize = 3;

/// Generate a branch name slug from a commit message.
///
/// - Lowercase
/// - Runs of whitespace become a single hyphen
/// - Every other character that is not an ASCII letter, digit or `-` is dropped
/// - Leading/trailing hyphens are trimmed and the result is capped at 50 characters
///
/// # Example
///
/// ```
/// use pr_cli::core::naming::slugify;
///
/// assert_eq!(slugify("Add user authentication"), "add-user-authentication");
/// assert_eq!(slugify("Fix bug #123"), "fix-bug-123");
/// ```
pub fn slugify(message: &str) -> String {
    let mut slug = String::with_capacity(message.len());
    let mut pending_separator = false;

    for c in message.chars() {
        if c.is_whitespace() || c == '\u{200b}' || c == '-' {
            pending_separator = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        }
    }

    let truncated: String = slug.chars().take(50).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Reverse of [`slugify`] as far as possible: separators become spaces.
///
/// # Example
///
/// ```
/// use pr_cli::core::naming::unslugify;
///
/// assert_eq!(unslugify("fix-login_redirect"), "fix login redirect");
/// ```
pub fn unslugify(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive a pull request title from a branch name.
///
/// # Example
///
/// ```
/// use pr_cli::core::naming::branch_name_to_title;
///
/// assert_eq!(branch_name_to_title("fix-login-redirect"), "Fix login redirect");
/// ```
pub fn branch_name_to_title(branch_name: &str) -> String {
    let title = unslugify(branch_name);
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fold `text` onto one line: every control character (newline, tab, ...)
/// becomes a space. Surrounding whitespace is trimmed.
///
/// # Example
///
/// ```
/// use pr_cli::core::naming::single_line;
///
/// assert_eq!(single_line(" Fix login\nredirect\t"), "Fix login redirect");
/// ```
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate a branch name typed by the user.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns a message to show before asking again.
pub fn parse_branch_input(input: &str) -> Result<BranchName, String> {
    let input = input.trim();
    if input.chars().count() < MIN_BRANCH_NAME_LEN {
        return Err(format!(
            "Branch name should be at least {MIN_BRANCH_NAME_LEN} characters long"
        ));
    }
    BranchName::new(input).map_err(|e| e.to_string())
}
