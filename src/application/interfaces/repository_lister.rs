use async_trait::async_trait;

use crate::domain::{DomainError, OwnerKind, RemoteRepository};

/// Enumerates the repositories belonging to a hosting-service organization
/// or user, handling pagination internally.
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    async fn list_repositories(
        &self,
        owner: &str,
        kind: OwnerKind,
    ) -> Result<Vec<RemoteRepository>, DomainError>;
}
