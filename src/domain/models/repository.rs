use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::DomainError;

/// Whether a hosting-service owner is an organization or a plain user.
/// The two differ only in which listing endpoint applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Organization,
    User,
}

impl OwnerKind {
    pub fn api_segment(&self) -> &'static str {
        match self {
            OwnerKind::Organization => "orgs",
            OwnerKind::User => "users",
        }
    }
}

/// A repository as reported by the hosting-service listing API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRepository {
    pub name: String,
    pub clone_url: String,
}

/// Identifies one repository to scan: where it lives remotely (if anywhere),
/// who owns it, and where its local checkout goes.
///
/// Immutable once constructed. The repository name is derived from the URL
/// (last path segment, minus the VCS suffix) or from the local directory name
/// when no URL is given.
#[derive(Debug, Clone)]
pub struct RepositoryHandle {
    url: Option<String>,
    organization: String,
    name: String,
    local_path: PathBuf,
}

impl RepositoryHandle {
    /// Builds a handle from a clone URL. The checkout lands under
    /// `<clones_root>/<organization>/<name>`.
    pub fn from_url(url: &str, clones_root: &Path) -> Result<Self, DomainError> {
        let (organization, name) = parse_owner_and_name(url).ok_or_else(|| {
            DomainError::invalid_input(format!("Cannot derive repository name from URL: {}", url))
        })?;

        let local_path = clones_root.join(&organization).join(&name);

        Ok(Self {
            url: Some(url.to_string()),
            organization,
            name,
            local_path,
        })
    }

    /// Builds a handle for a purely local checkout. No clone or pull will be
    /// attempted for it.
    pub fn from_local(path: &Path, organization: &str) -> Result<Self, DomainError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.trim_end_matches(".git").to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                DomainError::invalid_input(format!(
                    "Cannot derive repository name from path: {}",
                    path.display()
                ))
            })?;

        Ok(Self {
            url: None,
            organization: organization.to_string(),
            name,
            local_path: path.to_path_buf(),
        })
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }
}

/// Extracts `(owner, repository)` from a clone URL.
///
/// Handles `https://host/owner/repo.git`, `ssh://git@host/owner/repo` and the
/// scp-like `git@host:owner/repo.git` form.
fn parse_owner_and_name(url: &str) -> Option<(String, String)> {
    let path = if let Some(idx) = url.find("://") {
        let after_scheme = &url[idx + 3..];
        let (_, path) = after_scheme.split_once('/')?;
        path
    } else if url.starts_with("git@") {
        let (_, path) = url.split_once(':')?;
        path
    } else {
        return None;
    };

    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let (owner, name) = path.rsplit_once('/')?;

    // Sub-grouped owners keep only the last segment so the on-disk layout
    // stays two levels deep.
    let owner = owner.rsplit('/').next().unwrap_or(owner);

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    Some((owner.to_string(), name.to_string()))
}
