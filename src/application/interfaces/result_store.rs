use async_trait::async_trait;

use crate::domain::{DomainError, ResultRecord};

/// Persistence for normalized scan results.
///
/// `consolidate = true` appends to whatever store already exists;
/// `consolidate = false` backs the previous store up under a timestamped
/// name and starts fresh. Returns the number of records written.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn write(
        &self,
        records: &[ResultRecord],
        consolidate: bool,
    ) -> Result<usize, DomainError>;
}
