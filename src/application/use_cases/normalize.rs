use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::VcsClient;
use crate::domain::{
    render_blob_url, CommitId, CommitMeta, MatchRecord, ParsedMatch, RepositoryHandle,
    ResultRecord,
};

/// Turns raw match records into canonical, deduplicated result records.
///
/// Each matched-file entry is decoded independently: a malformed entry is
/// skipped without touching the rest of the commit's entries. Commit metadata
/// is resolved once per commit and cached for the lifetime of the normalizer
/// (one scan run), so a commit with many matched files costs one lookup.
pub struct ResultNormalizer {
    vcs: Arc<dyn VcsClient>,
    blob_url_template: Option<String>,
    meta_cache: HashMap<String, CommitMeta>,
    seen: HashSet<(String, String, String)>,
    skipped: usize,
}

impl ResultNormalizer {
    pub fn new(vcs: Arc<dyn VcsClient>, blob_url_template: Option<String>) -> Self {
        Self {
            vcs,
            blob_url_template,
            meta_cache: HashMap::new(),
            seen: HashSet::new(),
            skipped: 0,
        }
    }

    /// Normalizes every well-formed matched-file entry of `record` into a
    /// result record, at most one per (repository, commit, filepath).
    pub async fn normalize(
        &mut self,
        handle: &RepositoryHandle,
        local_path: &Path,
        record: &MatchRecord,
    ) -> Vec<ResultRecord> {
        let mut results = Vec::new();

        for raw in record.matched_files() {
            let parsed = match ParsedMatch::parse(raw) {
                Some(parsed) => parsed,
                None => {
                    debug!("Skipping unparseable match entry: {}", raw);
                    self.skipped += 1;
                    continue;
                }
            };

            let key = (
                handle.name().to_string(),
                parsed.sha.clone(),
                parsed.filepath.clone(),
            );
            if !self.seen.insert(key) {
                continue;
            }

            let meta = match self.lookup_meta(local_path, &parsed.sha).await {
                Some(meta) => meta,
                None => {
                    self.skipped += 1;
                    continue;
                }
            };

            let blob_url = self.blob_url_template.as_deref().map(|template| {
                render_blob_url(
                    template,
                    handle.organization(),
                    handle.name(),
                    &parsed.sha,
                    &parsed.filepath,
                )
            });

            let branches_names = if record.branches().is_empty() {
                None
            } else {
                Some(record.branches().to_vec())
            };

            results.push(ResultRecord {
                organization_name: handle.organization().to_string(),
                repository_name: handle.name().to_string(),
                commit_sha: parsed.sha,
                filepath: parsed.filepath,
                username: meta.author,
                email: meta.email,
                commit_time: meta.commit_time,
                branches_names,
                blob_url,
            });
        }

        results
    }

    /// Entries dropped because they failed to decode or resolve.
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }

    async fn lookup_meta(&mut self, local_path: &Path, sha: &str) -> Option<CommitMeta> {
        if let Some(meta) = self.meta_cache.get(sha) {
            return Some(meta.clone());
        }

        match self
            .vcs
            .commit_meta(local_path, &CommitId::new(sha))
            .await
        {
            Ok(meta) => {
                self.meta_cache.insert(sha.to_string(), meta.clone());
                Some(meta)
            }
            Err(e) => {
                warn!("Failed to resolve metadata for {}: {}", sha, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::domain::{
        Branch, DomainError, SearchPredicate, GITHUB_BLOB_URL_TEMPLATE,
    };

    const SHA: &str = "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";

    struct StubVcs {
        meta_lookups: AtomicUsize,
    }

    impl StubVcs {
        fn new() -> Self {
            Self {
                meta_lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VcsClient for StubVcs {
        async fn materialize(
            &self,
            handle: &RepositoryHandle,
        ) -> Result<PathBuf, DomainError> {
            Ok(handle.local_path().to_path_buf())
        }

        async fn list_branches(&self, _local_path: &Path) -> Result<Vec<Branch>, DomainError> {
            Ok(Vec::new())
        }

        async fn list_commits(
            &self,
            _local_path: &Path,
            _branch: &Branch,
        ) -> Result<Vec<CommitId>, DomainError> {
            Ok(Vec::new())
        }

        async fn grep_commit(
            &self,
            _local_path: &Path,
            _commit: &CommitId,
            _predicate: &SearchPredicate,
        ) -> Result<Vec<String>, DomainError> {
            Ok(Vec::new())
        }

        async fn branches_containing(
            &self,
            _local_path: &Path,
            _commit: &CommitId,
        ) -> Result<Vec<String>, DomainError> {
            Ok(Vec::new())
        }

        async fn commit_meta(
            &self,
            _local_path: &Path,
            _commit: &CommitId,
        ) -> Result<CommitMeta, DomainError> {
            self.meta_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(CommitMeta {
                author: "Jane Dev".into(),
                email: "jane@acme.example".into(),
                commit_time: "2016-06-12T10:01:02+03:00".into(),
            })
        }
    }

    fn handle() -> RepositoryHandle {
        RepositoryHandle::from_url("https://github.com/acme/widgets.git", Path::new("/clones"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_entry_does_not_poison_the_commit() {
        let vcs = Arc::new(StubVcs::new());
        let mut normalizer = ResultNormalizer::new(vcs, None);

        let record = MatchRecord::new(
            CommitId::new(SHA),
            vec![format!("{}:config/secrets.yml:2", SHA), "onlyfilename".into()],
            vec!["main".into()],
        );

        let results = normalizer
            .normalize(&handle(), Path::new("/clones/acme/widgets"), &record)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filepath, "config/secrets.yml");
        assert_eq!(normalizer.skipped_entries(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_entries_collapse_to_one_record() {
        let vcs = Arc::new(StubVcs::new());
        let mut normalizer = ResultNormalizer::new(vcs, None);

        let entry = format!("{}:config/secrets.yml:2", SHA);
        let record = MatchRecord::new(
            CommitId::new(SHA),
            vec![entry.clone(), entry],
            vec!["main".into()],
        );

        let results = normalizer
            .normalize(&handle(), Path::new("/clones/acme/widgets"), &record)
            .await;

        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_resolved_once_per_commit() {
        let vcs = Arc::new(StubVcs::new());
        let mut normalizer = ResultNormalizer::new(vcs.clone(), None);

        let record = MatchRecord::new(
            CommitId::new(SHA),
            vec![
                format!("{}:a.txt:1", SHA),
                format!("{}:b.txt:1", SHA),
                format!("{}:c.txt:4", SHA),
            ],
            vec![],
        );

        let results = normalizer
            .normalize(&handle(), Path::new("/clones/acme/widgets"), &record)
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(vcs.meta_lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blob_url_rendered_from_template() {
        let vcs = Arc::new(StubVcs::new());
        let mut normalizer =
            ResultNormalizer::new(vcs, Some(GITHUB_BLOB_URL_TEMPLATE.to_string()));

        let record = MatchRecord::new(
            CommitId::new(SHA),
            vec![format!("{}:a.txt:1", SHA)],
            vec![],
        );

        let results = normalizer
            .normalize(&handle(), Path::new("/clones/acme/widgets"), &record)
            .await;

        assert_eq!(
            results[0].blob_url.as_deref(),
            Some(format!("https://github.com/acme/widgets/blob/{}/a.txt", SHA).as_str())
        );
        assert!(results[0].branches_names.is_none());
    }
}
