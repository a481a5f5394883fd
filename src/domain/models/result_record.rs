use serde::{Deserialize, Serialize};

/// Default deep-link template for repositories hosted on GitHub.
pub const GITHUB_BLOB_URL_TEMPLATE: &str =
    "https://github.com/{organization}/{repository}/blob/{sha}/{path}";

/// One persisted finding: a search string matched `filepath` as of
/// `commit_sha`.
///
/// At most one record exists per (repository_name, commit_sha, filepath)
/// tuple within a scan run. Immutable; owned by the result store once
/// written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub organization_name: String,
    pub repository_name: String,
    pub commit_sha: String,
    pub filepath: String,
    pub username: String,
    pub email: String,
    pub commit_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
}

impl ResultRecord {
    /// The tuple that must be unique within one scan run.
    pub fn unique_key(&self) -> (String, String, String) {
        (
            self.repository_name.clone(),
            self.commit_sha.clone(),
            self.filepath.clone(),
        )
    }
}

/// Fills a blob-URL template. Placeholders: `{organization}`, `{repository}`,
/// `{sha}`, `{path}`. The produced link is never validated — a file renamed
/// on that ref later will 404, and that is acceptable.
pub fn render_blob_url(
    template: &str,
    organization: &str,
    repository: &str,
    sha: &str,
    path: &str,
) -> String {
    template
        .replace("{organization}", organization)
        .replace("{repository}", repository)
        .replace("{sha}", sha)
        .replace("{path}", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResultRecord {
        ResultRecord {
            organization_name: "acme".into(),
            repository_name: "widgets".into(),
            commit_sha: "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3".into(),
            filepath: "config/secrets.yml".into(),
            username: "Jane Dev".into(),
            email: "jane@acme.example".into(),
            commit_time: "2016-06-12T10:01:02+03:00".into(),
            branches_names: Some(vec!["main".into()]),
            blob_url: None,
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "organization_name",
            "repository_name",
            "commit_sha",
            "filepath",
            "username",
            "email",
            "commit_time",
            "branches_names",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
        assert!(!object.contains_key("blob_url"), "None blob_url must be omitted");
    }

    #[test]
    fn test_unique_key_components() {
        let key = record().unique_key();
        assert_eq!(key.0, "widgets");
        assert_eq!(key.2, "config/secrets.yml");
    }

    #[test]
    fn test_render_github_blob_url() {
        let url = render_blob_url(
            GITHUB_BLOB_URL_TEMPLATE,
            "acme",
            "widgets",
            "abc123",
            "config/secrets.yml",
        );
        assert_eq!(
            url,
            "https://github.com/acme/widgets/blob/abc123/config/secrets.yml"
        );
    }
}
