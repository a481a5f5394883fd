use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::application::{CommitEnumerator, ResultNormalizer, ResultStore, VcsClient};
use crate::domain::{
    DomainError, MatchRecord, RepositoryHandle, SearchPredicate, SearchSpec,
};

/// Outcome of scanning one repository.
#[derive(Debug)]
pub struct ScanReport {
    pub repository_name: String,
    pub commits_scanned: usize,
    pub matching_commits: usize,
    pub records_written: usize,
    /// Branch-level failures that were skipped, for the caller's run summary.
    pub errors: Vec<String>,
}

/// The single-repository pipeline: materialize, enumerate, scan every
/// commit, normalize the matches, persist once at the end.
pub struct ScanRepositoryUseCase {
    vcs: Arc<dyn VcsClient>,
    store: Arc<dyn ResultStore>,
    blob_url_template: Option<String>,
}

impl ScanRepositoryUseCase {
    pub fn new(vcs: Arc<dyn VcsClient>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            vcs,
            store,
            blob_url_template: None,
        }
    }

    pub fn with_blob_url_template(mut self, template: impl Into<String>) -> Self {
        self.blob_url_template = Some(template.into());
        self
    }

    pub async fn execute(
        &self,
        handle: &RepositoryHandle,
        spec: &SearchSpec,
        consolidate: bool,
    ) -> Result<ScanReport, DomainError> {
        let start_time = Instant::now();
        let predicate = SearchPredicate::build(spec);

        let local_path = self.vcs.materialize(handle).await?;

        let enumerator = CommitEnumerator::new(self.vcs.clone());
        let (commits, errors) = enumerator.all_commits(&local_path).await?;

        info!(
            "Scanning {} commits of {} for {} string(s)...",
            commits.len(),
            handle.name(),
            spec.len()
        );

        let progress_bar = ProgressBar::new(commits.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let mut normalizer =
            ResultNormalizer::new(self.vcs.clone(), self.blob_url_template.clone());
        let mut results = Vec::new();
        let mut matching_commits = 0usize;

        for commit in &commits {
            // A scan the search facility cannot process is indistinguishable
            // from "no match"; neither aborts the remaining commits.
            let raw_entries = match self.vcs.grep_commit(&local_path, commit, &predicate).await {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("Content scan failed for {}: {}", commit, e);
                    Vec::new()
                }
            };

            if raw_entries.is_empty() {
                progress_bar.inc(1);
                continue;
            }

            // Branch membership is resolved lazily, only for commits that
            // actually matched.
            let branches = match self.vcs.branches_containing(&local_path, commit).await {
                Ok(branches) => branches,
                Err(e) => {
                    debug!("Branch lookup failed for {}: {}", commit, e);
                    Vec::new()
                }
            };

            matching_commits += 1;
            let record = MatchRecord::new(commit.clone(), raw_entries, branches);
            let records = normalizer.normalize(handle, &local_path, &record).await;
            results.extend(records);

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        if normalizer.skipped_entries() > 0 {
            debug!(
                "Skipped {} unusable match entries in {}",
                normalizer.skipped_entries(),
                handle.name()
            );
        }

        let records_written = self.store.write(&results, consolidate).await?;

        let duration = start_time.elapsed();
        info!(
            "Scanned {} in {:.2}s: {} matching commit(s), {} record(s) written",
            handle.name(),
            duration.as_secs_f64(),
            matching_commits,
            records_written
        );

        Ok(ScanReport {
            repository_name: handle.name().to_string(),
            commits_scanned: commits.len(),
            matching_commits,
            records_written,
            errors,
        })
    }
}
