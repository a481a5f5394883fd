use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{
    Branch, CommitId, CommitMeta, DomainError, RepositoryHandle, SearchPredicate,
};

/// Boundary to the underlying version-control tool.
///
/// The engine never implements history or content storage itself; everything
/// below goes through this trait so the pipeline stays testable without a
/// real `git` binary.
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Ensures an up-to-date local checkout for `handle` exists and returns
    /// its path: clone when absent, fast-forward update when present.
    /// Transient failures are retried a bounded number of times; exhausting
    /// the retries is fatal for this repository.
    async fn materialize(&self, handle: &RepositoryHandle) -> Result<PathBuf, DomainError>;

    /// Lists every branch of the checkout, local and remote-tracking.
    async fn list_branches(&self, local_path: &Path) -> Result<Vec<Branch>, DomainError>;

    /// Lists every commit reachable from the tip of `branch`.
    async fn list_commits(
        &self,
        local_path: &Path,
        branch: &Branch,
    ) -> Result<Vec<CommitId>, DomainError>;

    /// Applies `predicate` to the tree of `commit` and returns the raw
    /// matched-file entries as printed by the search facility.
    ///
    /// A scan the facility cannot process (binary content, encoding issues)
    /// is indistinguishable from "no match" and yields an empty list.
    async fn grep_commit(
        &self,
        local_path: &Path,
        commit: &CommitId,
        predicate: &SearchPredicate,
    ) -> Result<Vec<String>, DomainError>;

    /// Short names of the branches whose tip has `commit` as an ancestor.
    async fn branches_containing(
        &self,
        local_path: &Path,
        commit: &CommitId,
    ) -> Result<Vec<String>, DomainError>;

    /// Author name, email, and commit time for `commit`.
    async fn commit_meta(
        &self,
        local_path: &Path,
        commit: &CommitId,
    ) -> Result<CommitMeta, DomainError>;
}
