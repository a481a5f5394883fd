//! In-memory result storage.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ResultStore;
use crate::domain::{DomainError, ResultRecord};

/// In-memory result store for testing and development.
pub struct InMemoryResultStore {
    records: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn records(&self) -> Vec<ResultRecord> {
        self.records.lock().await.clone()
    }
}

impl Default for InMemoryResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn write(
        &self,
        records: &[ResultRecord],
        consolidate: bool,
    ) -> Result<usize, DomainError> {
        let mut store = self.records.lock().await;
        if !consolidate {
            store.clear();
        }
        store.extend(records.iter().cloned());
        Ok(records.len())
    }
}
