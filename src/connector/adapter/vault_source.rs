use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::SearchTermSource;
use crate::domain::DomainError;

/// Key names that typically hold secret material worth scanning for.
pub const DEFAULT_KEY_PATTERNS: [&str; 7] = [
    ".*password.*",
    ".*key.*",
    ".*secret.*",
    ".*id.*",
    ".*endpoint.*",
    ".*tenant.*",
    ".*api.*",
];

#[derive(Deserialize)]
struct ListResponse {
    data: ListData,
}

#[derive(Deserialize)]
struct ListData {
    keys: Vec<String>,
}

#[derive(Deserialize)]
struct SecretResponse {
    data: HashMap<String, serde_json::Value>,
}

/// Search-term discovery from a Vault KV store.
///
/// Lists the secrets under `secret_path`, reads each one, and keeps the
/// values whose key matches the configured key-list. SSH private-key
/// material is skipped; it never greps usefully.
pub struct VaultSource {
    client: reqwest::Client,
    address: String,
    token: String,
    secret_path: String,
    key_patterns: Vec<Regex>,
}

impl VaultSource {
    pub fn new(
        address: impl Into<String>,
        token: impl Into<String>,
        secret_path: impl Into<String>,
        key_list: Option<Vec<String>>,
    ) -> Result<Self, DomainError> {
        let patterns = key_list
            .unwrap_or_else(|| DEFAULT_KEY_PATTERNS.iter().map(|p| p.to_string()).collect());

        let key_patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&p.to_lowercase()).map_err(|e| {
                    DomainError::plugin(format!("Invalid Vault key pattern {:?}: {}", p, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            address: address.into().trim_end_matches('/').to_string(),
            token: token.into(),
            secret_path: secret_path.into().trim_matches('/').to_string(),
            key_patterns,
        })
    }

    fn key_matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.key_patterns.iter().any(|p| p.is_match(&key))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DomainError> {
        let response = self
            .client
            .get(url)
            .header("X-Vault-Token", &self.token)
            .send()
            .await
            .map_err(|e| DomainError::plugin(format!("Vault request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::plugin(format!(
                "Vault returned {} for {}",
                response.status(),
                url
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::plugin(format!("Failed to parse Vault response: {}", e)))
    }
}

#[async_trait]
impl SearchTermSource for VaultSource {
    async fn fetch_terms(&self) -> Result<Vec<String>, DomainError> {
        let list_url = format!("{}/v1/{}?list=true", self.address, self.secret_path);
        let listing: ListResponse = self.get_json(&list_url).await?;

        let mut terms = Vec::new();
        for secret_name in listing.data.keys {
            let secret_url = format!("{}/v1/{}/{}", self.address, self.secret_path, secret_name);
            let secret: SecretResponse = match self.get_json(&secret_url).await {
                Ok(secret) => secret,
                Err(e) => {
                    warn!("Skipping Vault secret {}: {}", secret_name, e);
                    continue;
                }
            };

            for (key, value) in secret.data {
                let value = match value.as_str() {
                    Some(v) => v,
                    None => continue,
                };
                if !self.key_matches(&key) {
                    continue;
                }
                if value.to_lowercase().contains("ssh-rsa") {
                    continue;
                }
                terms.push(value.to_string());
            }
        }

        debug!("Vault contributed {} search term(s)", terms.len());
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> VaultSource {
        VaultSource::new("http://vault:8200/", "token", "/secret/apps/", None).unwrap()
    }

    #[test]
    fn test_default_key_list_matches_common_names() {
        let source = source();
        assert!(source.key_matches("db_password"));
        assert!(source.key_matches("API_KEY"));
        assert!(source.key_matches("client_secret"));
        assert!(source.key_matches("tenant_name"));
        assert!(!source.key_matches("description"));
    }

    #[test]
    fn test_paths_are_normalized() {
        let source = source();
        assert_eq!(source.address, "http://vault:8200");
        assert_eq!(source.secret_path, "secret/apps");
    }

    #[test]
    fn test_invalid_pattern_is_a_plugin_error() {
        let result = VaultSource::new("http://vault:8200", "t", "secret", Some(vec!["(".into()]));
        assert!(result.is_err());
    }
}
