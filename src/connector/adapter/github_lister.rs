use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::RepositoryLister;
use crate::domain::{DomainError, OwnerKind, RemoteRepository};

/// Default target: the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const REPOS_PER_PAGE: u32 = 100;

/// Paginated repository listing against the GitHub REST API.
///
/// Pages of `per_page=100` are fetched until an empty page comes back.
/// Credentials are optional; anonymous requests are rate-limited to 60/h,
/// which is usually too little for a whole organization.
pub struct GithubLister {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl GithubLister {
    pub fn new(credentials: Option<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(concat!("leakhound/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Override the API base URL (GitHub Enterprise installations).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl RepositoryLister for GithubLister {
    async fn list_repositories(
        &self,
        owner: &str,
        kind: OwnerKind,
    ) -> Result<Vec<RemoteRepository>, DomainError> {
        if self.credentials.is_none() {
            warn!(
                "Choosing not to provide GitHub credentials limits requests \
                 to GitHub to 60/h. This might affect listing and cloning."
            );
        }

        let url = format!("{}/{}/{}/repos", self.base_url, kind.api_segment(), owner);
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            let mut request = self.client.get(&url).query(&[
                ("type", "public".to_string()),
                ("per_page", REPOS_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            if let Some((user, password)) = &self.credentials {
                request = request.basic_auth(user, Some(password));
            }

            let response = request
                .send()
                .await
                .map_err(|e| DomainError::listing(format!("GitHub request failed: {}", e)))?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(DomainError::listing(format!(
                    "The organization or user {} could not be found. \
                     Please make sure you use the correct type (org/user).",
                    owner
                )));
            }
            if !response.status().is_success() {
                return Err(DomainError::listing(format!(
                    "GitHub returned {} for {}",
                    response.status(),
                    owner
                )));
            }

            let batch: Vec<RemoteRepository> = response
                .json()
                .await
                .map_err(|e| DomainError::listing(format!("Failed to parse GitHub response: {}", e)))?;

            if batch.is_empty() {
                break;
            }

            debug!("Fetched page {} ({} repositories)", page, batch.len());
            repositories.extend(batch);
            page += 1;
        }

        Ok(repositories)
    }
}
