use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::DomainError;

/// What a completed scan run produced, for alerting and telemetry.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub records_written: usize,
    pub results_path: PathBuf,
}

/// An alerting integration fired after a scan that found something.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &ScanSummary) -> Result<(), DomainError>;
}
