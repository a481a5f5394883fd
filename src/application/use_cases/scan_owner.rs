use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::application::{RepositoryLister, ScanRepositoryUseCase};
use crate::domain::{DomainError, OwnerKind, RemoteRepository, RepositoryHandle, SearchSpec};

/// Restricts an owner scan to a subset of its repositories.
///
/// Including and excluding at the same time is contradictory and rejected at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ScanFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Result<Self, DomainError> {
        if !include.is_empty() && !exclude.is_empty() {
            return Err(DomainError::config(
                "You can not both include and exclude repositories",
            ));
        }
        Ok(Self { include, exclude })
    }

    pub fn selects(&self, name: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.iter().any(|n| n == name);
        }
        !self.exclude.iter().any(|n| n == name)
    }

    fn apply(&self, repositories: Vec<RemoteRepository>) -> Vec<RemoteRepository> {
        repositories
            .into_iter()
            .filter(|r| self.selects(&r.name))
            .collect()
    }
}

/// Outcome of scanning every selected repository of one owner.
#[derive(Debug)]
pub struct OwnerScanReport {
    pub repositories_scanned: usize,
    pub records_written: usize,
    pub errors: Vec<String>,
}

/// Lists an organization's (or user's) repositories and runs the
/// single-repository pipeline over each in turn.
///
/// A repository that fails fatally is recorded in the run summary and does
/// not stop the remaining repositories. All repositories of one run land in
/// one result store: the first successful write honors the caller's
/// consolidation flag, later writes always append.
pub struct ScanOwnerUseCase {
    lister: Arc<dyn RepositoryLister>,
    scanner: ScanRepositoryUseCase,
}

impl ScanOwnerUseCase {
    pub fn new(lister: Arc<dyn RepositoryLister>, scanner: ScanRepositoryUseCase) -> Self {
        Self { lister, scanner }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        owner: &str,
        kind: OwnerKind,
        spec: &SearchSpec,
        clones_root: &Path,
        filter: &ScanFilter,
        consolidate: bool,
    ) -> Result<OwnerScanReport, DomainError> {
        let repositories = self.lister.list_repositories(owner, kind).await?;
        let selected = filter.apply(repositories);

        info!("Scanning {} repositories of {}...", selected.len(), owner);

        let mut report = OwnerScanReport {
            repositories_scanned: 0,
            records_written: 0,
            errors: Vec::new(),
        };
        let mut consolidate_next = consolidate;

        for repository in selected {
            let handle = match RepositoryHandle::from_url(&repository.clone_url, clones_root) {
                Ok(handle) => handle,
                Err(e) => {
                    error!("Skipping {}: {}", repository.name, e);
                    report.errors.push(format!("{}: {}", repository.name, e));
                    continue;
                }
            };

            match self.scanner.execute(&handle, spec, consolidate_next).await {
                Ok(scan) => {
                    report.repositories_scanned += 1;
                    report.records_written += scan.records_written;
                    report.errors.extend(
                        scan.errors
                            .into_iter()
                            .map(|e| format!("{}: {}", scan.repository_name, e)),
                    );
                    consolidate_next = true;
                }
                Err(e) => {
                    error!("Failed to scan {}: {}", repository.name, e);
                    report.errors.push(format!("{}: {}", repository.name, e));
                }
            }
        }

        Ok(report)
    }
}
