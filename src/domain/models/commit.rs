use std::fmt;

/// An opaque, fixed-format commit hash as produced by the VCS.
///
/// Used as a set member (commits deduplicate across branches) and as the
/// lookup key for metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author metadata for one commit, resolved lazily at normalization time.
#[derive(Debug, Clone)]
pub struct CommitMeta {
    pub author: String,
    pub email: String,
    pub commit_time: String,
}

/// Returns true when `s` is a full hex object id (SHA-1 or SHA-256 repos).
pub fn is_full_sha(s: &str) -> bool {
    (s.len() == 40 || s.len() == 64) && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_id_display() {
        let id = CommitId::new("0123abc");
        assert_eq!(id.to_string(), "0123abc");
        assert_eq!(id.as_str(), "0123abc");
    }

    #[test]
    fn test_full_sha_detection() {
        assert!(is_full_sha(&"a".repeat(40)));
        assert!(is_full_sha(&"0".repeat(64)));
        assert!(!is_full_sha("deadbeef"));
        assert!(!is_full_sha(&"g".repeat(40)));
        assert!(!is_full_sha(""));
    }
}
