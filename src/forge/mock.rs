//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge stores pull requests in memory, records every operation
//! and can be told to fail a given operation.
//!
//! # Example
//!
//! ```
//! use pr_cli::forge::mock::{MockForge, MockOperation};
//! use pr_cli::forge::{CreatePrRequest, Forge};
//!
//! let forge = MockForge::new();
//! forge.create_pr(CreatePrRequest {
//!     base: "main".to_string(),
//!     title: "Add feature".to_string(),
//!     body: String::new(),
//!     draft: false,
//! }).unwrap();
//!
//! assert!(matches!(forge.operations()[0], MockOperation::CreatePr { .. }));
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{CreatePrRequest, Forge, ForgeError, PrFilter, PullRequest, UpdatePrRequest};

/// Mock forge for testing.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

#[derive(Debug, Default)]
struct MockForgeInner {
    prs: Vec<PullRequest>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Which operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    CreatePr,
    UpdatePr,
    SetDraft,
    ListPrs,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CreatePr(CreatePrRequest),
    UpdatePr(UpdatePrRequest),
    SetDraft(bool),
    ListPrs(PrFilter),
}

impl MockForge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that already has these open pull requests.
    pub fn with_prs(prs: Vec<PullRequest>) -> Self {
        let forge = Self::new();
        forge.lock().prs = prs;
        forge
    }

    /// Make `operation` fail from now on.
    pub fn fail_on(self, operation: FailOn) -> Self {
        self.lock().fail_on = Some(operation);
        self
    }

    /// All operations recorded so far, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockForgeInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, operation: MockOperation, kind: FailOn) -> Result<(), ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(operation);
        if inner.fail_on == Some(kind) {
            return Err(ForgeError::Rejected(format!("mock failure: {kind:?}")));
        }
        Ok(())
    }
}

impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn create_pr(&self, request: CreatePrRequest) -> Result<(), ForgeError> {
        self.record(MockOperation::CreatePr(request), FailOn::CreatePr)
    }

    fn update_pr(&self, request: UpdatePrRequest) -> Result<(), ForgeError> {
        self.record(MockOperation::UpdatePr(request), FailOn::UpdatePr)
    }

    fn set_draft(&self, draft: bool) -> Result<(), ForgeError> {
        self.record(MockOperation::SetDraft(draft), FailOn::SetDraft)
    }

    fn list_prs(&self, filter: &PrFilter) -> Result<Vec<PullRequest>, ForgeError> {
        self.record(MockOperation::ListPrs(filter.clone()), FailOn::ListPrs)?;
        let inner = self.lock();
        Ok(inner
            .prs
            .iter()
            .filter(|pr| filter.head.as_ref().map_or(true, |head| &pr.head == head))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(number: u64, head: &str) -> PullRequest {
        PullRequest {
            number,
            title: format!("PR {number}"),
            body: String::new(),
            is_draft: false,
            head: head.to_string(),
            base: "main".to_string(),
            commits: vec![],
        }
    }

    #[test]
    fn find_by_head() {
        let forge = MockForge::with_prs(vec![pr(1, "a"), pr(2, "b")]);
        assert_eq!(forge.find_pr_by_head("b").unwrap().unwrap().number, 2);
        assert!(forge.find_pr_by_head("c").unwrap().is_none());
    }

    #[test]
    fn first_match_wins() {
        let forge = MockForge::with_prs(vec![pr(1, "a"), pr(3, "a")]);
        assert_eq!(forge.find_pr_by_head("a").unwrap().unwrap().number, 1);
    }

    #[test]
    fn configured_failure() {
        let forge = MockForge::new().fail_on(FailOn::SetDraft);
        assert!(forge.set_draft(true).is_err());
        assert_eq!(forge.operations(), vec![MockOperation::SetDraft(true)]);
    }
}
