use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::VcsClient;
use crate::domain::{dedup_logical, Branch, CommitId, DomainError};

/// Enumerates branches and the deduplicated set of all reachable commits for
/// one checkout.
///
/// Every listed ref — local and remote-tracking — is walked independently
/// with a read-only reachability query; the union deduplicates by commit id.
/// A branch whose walk fails is logged and skipped, never aborting the
/// remaining branches.
pub struct CommitEnumerator {
    vcs: Arc<dyn VcsClient>,
}

impl CommitEnumerator {
    pub fn new(vcs: Arc<dyn VcsClient>) -> Self {
        Self { vcs }
    }

    /// Logical branches of the checkout: short names deduplicated across
    /// their local and remote-tracking listings.
    pub async fn branches(&self, local_path: &Path) -> Result<Vec<Branch>, DomainError> {
        let listed = self.vcs.list_branches(local_path).await?;
        Ok(dedup_logical(&listed))
    }

    /// The union of commits reachable from every branch tip, in first-seen
    /// order, plus the walk failures that were skipped.
    pub async fn all_commits(
        &self,
        local_path: &Path,
    ) -> Result<(Vec<CommitId>, Vec<String>), DomainError> {
        let branches = self.vcs.list_branches(local_path).await?;

        let mut seen: HashSet<CommitId> = HashSet::new();
        let mut commits: Vec<CommitId> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for branch in &branches {
            match self.vcs.list_commits(local_path, branch).await {
                Ok(branch_commits) => {
                    debug!(
                        "Found {} commits on branch {}",
                        branch_commits.len(),
                        branch.rev_spec()
                    );
                    for commit in branch_commits {
                        if seen.insert(commit.clone()) {
                            commits.push(commit);
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping branch {}: {}", branch.rev_spec(), e);
                    errors.push(format!("branch {}: {}", branch.rev_spec(), e));
                }
            }
        }

        Ok((commits, errors))
    }
}
