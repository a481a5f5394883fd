use async_trait::async_trait;

use crate::domain::DomainError;

/// A plugin that contributes additional literal search strings, e.g. values
/// discovered in a secret store.
#[async_trait]
pub trait SearchTermSource: Send + Sync {
    async fn fetch_terms(&self) -> Result<Vec<String>, DomainError>;
}
