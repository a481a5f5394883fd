use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::application::ResultStore;
use crate::domain::{DomainError, ResultRecord};

/// Result store backed by one pretty-printed JSON array on disk.
///
/// Non-consolidated writes move any previous store aside under a
/// timestamp-suffixed name before writing fresh; consolidated writes append
/// to whatever is there. The whole store is rewritten in one pass, so a scan
/// that never reaches the write leaves no partial file behind.
pub struct JsonFileResultStore {
    path: PathBuf,
}

impl JsonFileResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_existing(&self) -> Result<Vec<ResultRecord>, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to read existing results file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            DomainError::storage(format!(
                "Existing results file {} is not valid: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn back_up_previous(&self) -> Result<(), DomainError> {
        let timestamp = chrono::Local::now().format("%Y%m%dT%H%M%S");
        let backup = PathBuf::from(format!("{}.{}", self.path.display(), timestamp));
        info!(
            "Previous results file found. Backing up to {}",
            backup.display()
        );
        tokio::fs::rename(&self.path, &backup).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to back up previous results file: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl ResultStore for JsonFileResultStore {
    async fn write(
        &self,
        records: &[ResultRecord],
        consolidate: bool,
    ) -> Result<usize, DomainError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create results directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut all_records = Vec::new();
        if self.path.is_file() {
            if consolidate {
                all_records = self.read_existing().await?;
            } else {
                self.back_up_previous().await?;
            }
        }
        all_records.extend(records.iter().cloned());

        let json = serde_json::to_string_pretty(&all_records)
            .map_err(|e| DomainError::storage(format!("Failed to serialize results: {}", e)))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to write results file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(records.len())
    }
}
