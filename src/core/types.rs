//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`RemoteName`] - Non-empty Git remote name
//! - [`Commit`] - Short SHA plus single-line message
//! - [`CommitWithBody`] - A commit together with its message body
//! - [`Commits`] - Non-empty, ordered list of commits to cherry-pick
//!
//! # Validation
//!
//! These types enforce validity at construction time. A `Settings` value
//! built from them cannot hold an empty commit list or an invalid branch.
//!
//! # Examples
//!
//! ```
//! use pr_cli::core::types::{BranchName, Commit, Commits};
//!
//! let branch = BranchName::new("fix/login-redirect").unwrap();
//! let commits = Commits::new(vec![Commit::new("abc123", "Fix bug")]).unwrap();
//! assert_eq!(commits.len(), 1);
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(Commits::new(vec![]).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid remote name: {0}")]
    InvalidRemoteName(String),

    #[error("no commits chosen")]
    NoCommits,
}

/// A validated Git branch name.
///
/// Branch names must conform to Git's refname rules (see `git check-ref-format`):
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
/// - Cannot be exactly `@`
///
/// # Example
///
/// ```
/// use pr_cli::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("branch.lock").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let invalid = |reason: &str| Err(TypeError::InvalidBranchName(reason.to_string()));

        if name.is_empty() {
            return invalid("branch name cannot be empty");
        }
        if name == "@" {
            return invalid("branch name cannot be '@' (reserved)");
        }
        if name.starts_with('.') {
            return invalid("branch name cannot start with '.'");
        }
        if name.starts_with('-') {
            return invalid("branch name cannot start with '-'");
        }
        if name.ends_with(".lock") {
            return invalid("branch name cannot end with '.lock'");
        }
        if name.ends_with('/') {
            return invalid("branch name cannot end with '/'");
        }

        for sequence in ["..", "@{", "//"] {
            if name.contains(sequence) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{sequence}'"
                )));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(TypeError::InvalidBranchName(format!(
                "branch name cannot contain '{c}'"
            )));
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return invalid("branch name cannot contain control characters");
        }

        for component in name.split('/').filter(|c| !c.is_empty()) {
            if component.starts_with('.') {
                return invalid("path component cannot start with '.'");
            }
            if component.ends_with(".lock") {
                return invalid("path component cannot end with '.lock'");
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Git remote name such as `origin` or `upstream`.
///
/// Only non-emptiness and the absence of whitespace are enforced; whether
/// the remote is configured is checked by the git layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteName(String);

impl RemoteName {
    /// Create a new remote name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteName` for empty names or names with whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidRemoteName(
                "remote name cannot be empty".into(),
            ));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidRemoteName(format!(
                "remote name '{name}' cannot contain whitespace"
            )));
        }
        Ok(Self(name))
    }

    /// Get the remote name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RemoteName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemoteName> for String {
    fn from(name: RemoteName) -> Self {
        name.0
    }
}

impl std::fmt::Display for RemoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit as presented to the user: abbreviated SHA and subject line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    /// Abbreviated commit hash
    pub sha: String,
    /// First line of the commit message
    pub message: String,
}

impl Commit {
    /// Create a commit from its short SHA and subject line.
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.sha, self.message)
    }
}

/// A commit together with the body of its message (everything after the subject).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitWithBody {
    /// Abbreviated commit hash
    pub sha: String,
    /// First line of the commit message
    pub message: String,
    /// Remaining lines of the commit message, trimmed
    pub body: String,
}

/// A non-empty list of commits, in the order they will be applied (oldest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commits(Vec<Commit>);

impl Commits {
    /// Create a commit list.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::NoCommits` if `commits` is empty.
    pub fn new(commits: Vec<Commit>) -> Result<Self, TypeError> {
        if commits.is_empty() {
            return Err(TypeError::NoCommits);
        }
        Ok(Self(commits))
    }

    /// The first commit to be applied.
    pub fn first(&self) -> &Commit {
        &self.0[0]
    }

    /// Number of commits. Always at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the commits in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Commit> {
        self.0.iter()
    }

    /// Borrow the commits as a slice.
    pub fn as_slice(&self) -> &[Commit] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Commits {
    type Item = &'a Commit;
    type IntoIter = std::slice::Iter<'a, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod branch_name {
        use super::*;

        #[test]
        fn valid_branch_names() {
            assert!(BranchName::new("main").is_ok());
            assert!(BranchName::new("feature/foo").is_ok());
            assert!(BranchName::new("fix-123").is_ok());
            assert!(BranchName::new("user@feature").is_ok());
            assert!(BranchName::new("with.dot").is_ok());
        }

        #[test]
        fn empty_name_rejected() {
            assert!(BranchName::new("").is_err());
        }

        #[test]
        fn leading_dot_or_dash_rejected() {
            assert!(BranchName::new(".hidden").is_err());
            assert!(BranchName::new("foo/.hidden").is_err());
            assert!(BranchName::new("-flag").is_err());
        }

        #[test]
        fn lock_suffix_rejected() {
            assert!(BranchName::new("branch.lock").is_err());
            assert!(BranchName::new("foo.lock/bar").is_err());
        }

        #[test]
        fn forbidden_sequences_rejected() {
            assert!(BranchName::new("bad..path").is_err());
            assert!(BranchName::new("foo@{bar").is_err());
            assert!(BranchName::new("foo//bar").is_err());
            assert!(BranchName::new("branch/").is_err());
        }

        #[test]
        fn special_characters_rejected() {
            for name in ["a b", "a~b", "a^b", "a:b", "a\\b", "a?b", "a*b", "a[b", "a\tb"] {
                assert!(BranchName::new(name).is_err(), "{name:?} should be invalid");
            }
        }

        #[test]
        fn error_names_the_problem() {
            let err = BranchName::new("has space").unwrap_err();
            assert_eq!(
                err,
                TypeError::InvalidBranchName("branch name cannot contain ' '".into())
            );
        }
    }

    mod remote_name {
        use super::*;

        #[test]
        fn accepts_common_names() {
            assert_eq!(RemoteName::new("origin").unwrap().as_str(), "origin");
            assert!(RemoteName::new("upstream").is_ok());
        }

        #[test]
        fn rejects_empty_and_whitespace() {
            assert!(RemoteName::new("").is_err());
            assert!(RemoteName::new("my remote").is_err());
        }
    }

    mod commits {
        use super::*;

        #[test]
        fn empty_list_rejected() {
            assert_eq!(Commits::new(vec![]), Err(TypeError::NoCommits));
        }

        #[test]
        fn preserves_order() {
            let commits = Commits::new(vec![
                Commit::new("aaa", "first"),
                Commit::new("bbb", "second"),
            ])
            .unwrap();
            let shas: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
            assert_eq!(shas, ["aaa", "bbb"]);
            assert_eq!(commits.first().message, "first");
            assert!(!commits.is_empty());
        }

        #[test]
        fn commit_display() {
            assert_eq!(Commit::new("abc123", "Fix bug").to_string(), "abc123 Fix bug");
        }
    }
}
