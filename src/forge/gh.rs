//! forge::gh
//!
//! GitHub forge backed by the `gh` CLI.
//!
//! Authentication, host selection and repository resolution are all left to
//! `gh`, which runs in the configured working directory.

use std::path::{Path, PathBuf};

use super::traits::{CreatePrRequest, Forge, ForgeError, PrFilter, PullRequest, UpdatePrRequest};
use crate::process;

const PR_FIELDS: &str = "title,body,number,isDraft,commits,headRefName,baseRefName";

/// `gh` running in one working directory.
#[derive(Debug, Clone)]
pub struct GhCli {
    cwd: PathBuf,
}

impl GhCli {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn run(&self, args: Vec<&str>) -> Result<(), ForgeError> {
        process::run("gh", args, Some(&self.cwd))?;
        Ok(())
    }
}

/// Arguments for `gh pr create`.
fn create_args(request: &CreatePrRequest) -> Vec<&str> {
    let mut args = vec!["pr", "create", "--assignee", "@me"];
    if !request.base.is_empty() {
        args.extend(["--base", request.base.as_str()]);
    }
    if request.draft {
        args.push("--draft");
    }
    args.extend(["--title", request.title.as_str()]);
    args.extend(["--body", request.body.as_str()]);
    args
}

/// Arguments for `gh pr edit`.
fn edit_args(request: &UpdatePrRequest) -> Vec<&str> {
    let mut args = vec![
        "pr",
        "edit",
        "--add-assignee",
        "@me",
        "--title",
        request.title.as_str(),
        "--body",
        request.body.as_str(),
    ];
    if let Some(base) = &request.base {
        args.extend(["--base", base.as_str()]);
    }
    args
}

/// Arguments for `gh pr list`.
fn list_args(filter: &PrFilter) -> Vec<&str> {
    let mut args = vec!["pr", "list"];
    if let Some(head) = &filter.head {
        args.extend(["--head", head.as_str()]);
    }
    if let Some(author) = &filter.author {
        args.extend(["--author", author.as_str()]);
    }
    args.extend(["--json", PR_FIELDS]);
    args
}

/// Parse `gh pr list --json` output.
///
/// Bodies are normalized to LF line endings; the body editor cannot handle
/// CRLF.
fn parse_pr_list(json: &str) -> Result<Vec<PullRequest>, ForgeError> {
    let prs: Vec<PullRequest> =
        serde_json::from_str(json).map_err(|e| ForgeError::InvalidResponse {
            forge: "gh",
            message: e.to_string(),
        })?;

    Ok(prs
        .into_iter()
        .map(|pr| PullRequest {
            body: pr.body.replace("\r\n", "\n"),
            ..pr
        })
        .collect())
}

impl Forge for GhCli {
    fn name(&self) -> &'static str {
        "gh"
    }

    fn create_pr(&self, request: CreatePrRequest) -> Result<(), ForgeError> {
        self.run(create_args(&request))
    }

    fn update_pr(&self, request: UpdatePrRequest) -> Result<(), ForgeError> {
        self.run(edit_args(&request))
    }

    fn set_draft(&self, draft: bool) -> Result<(), ForgeError> {
        let mut args = vec!["pr", "ready"];
        if draft {
            args.push("--undo");
        }
        self.run(args)
    }

    fn list_prs(&self, filter: &PrFilter) -> Result<Vec<PullRequest>, ForgeError> {
        let json = process::capture("gh", list_args(filter), Some(&self.cwd))?;
        parse_pr_list(&json)
    }
}

/// Create a pull request for the current branch, letting `gh` fill in the
/// title and body from the commits.
pub fn create_pr_autofill(cwd: &Path, base: Option<&str>) -> Result<(), ForgeError> {
    let mut args = vec!["pr", "create", "--assignee", "@me", "--fill"];
    if let Some(base) = base {
        args.extend(["--base", base]);
    }
    process::run("gh", args, Some(cwd))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_arguments() {
        let request = CreatePrRequest {
            base: "main".into(),
            title: "Fix bug".into(),
            body: "Body".into(),
            draft: true,
        };
        assert_eq!(
            create_args(&request),
            [
                "pr", "create", "--assignee", "@me", "--base", "main", "--draft", "--title",
                "Fix bug", "--body", "Body"
            ]
        );
    }

    #[test]
    fn edit_arguments() {
        let request = UpdatePrRequest {
            title: "T".into(),
            body: "B".into(),
            base: None,
        };
        assert_eq!(
            edit_args(&request),
            ["pr", "edit", "--add-assignee", "@me", "--title", "T", "--body", "B"]
        );

        let request = UpdatePrRequest {
            base: Some("develop".into()),
            ..request
        };
        assert_eq!(edit_args(&request)[8..], ["--base", "develop"]);
    }

    #[test]
    fn list_arguments() {
        assert_eq!(
            list_args(&PrFilter::head("fix-bug")),
            ["pr", "list", "--head", "fix-bug", "--json", PR_FIELDS]
        );
        assert_eq!(
            list_args(&PrFilter::mine()),
            ["pr", "list", "--author", "@me", "--json", PR_FIELDS]
        );
    }

    #[test]
    fn list_output_normalizes_line_endings() {
        let json = r#"[{
            "title": "T", "body": "a\r\nb", "number": 1, "isDraft": false,
            "headRefName": "h", "baseRefName": "main", "commits": []
        }]"#;
        let prs = parse_pr_list(json).unwrap();
        assert_eq!(prs[0].body, "a\nb");
    }

    #[test]
    fn list_output_must_be_an_array() {
        assert!(matches!(
            parse_pr_list(r#"{"message": "nope"}"#),
            Err(ForgeError::InvalidResponse { forge: "gh", .. })
        ));
    }
}
