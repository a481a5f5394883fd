use crate::domain::{is_full_sha, CommitId};

/// The raw outcome of scanning one commit: the matched-file entries exactly
/// as the content-search facility printed them, plus the branches that
/// contain the commit.
///
/// An empty `matched_files` unambiguously means "no match for this commit" —
/// there is no separate sentinel. Transient: produced and consumed within one
/// pipeline pass.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    commit: CommitId,
    matched_files: Vec<String>,
    branches: Vec<String>,
}

impl MatchRecord {
    pub fn new(commit: CommitId, matched_files: Vec<String>, branches: Vec<String>) -> Self {
        Self {
            commit,
            matched_files,
            branches,
        }
    }

    pub fn empty(commit: CommitId) -> Self {
        Self {
            commit,
            matched_files: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn commit(&self) -> &CommitId {
        &self.commit
    }

    pub fn matched_files(&self) -> &[String] {
        &self.matched_files
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn has_matches(&self) -> bool {
        !self.matched_files.is_empty()
    }
}

/// One successfully decoded matched-file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMatch {
    pub sha: String,
    pub filepath: String,
    pub match_count: Option<u64>,
}

impl ParsedMatch {
    /// Decodes a raw `sha:filepath[:count]` entry.
    ///
    /// The search facility's output format varies by flag: count mode emits
    /// three segments, plain mode two, and some modes emit bare filenames
    /// with no commit prefix at all. Only the first two shapes are usable;
    /// everything else returns `None` and the caller skips the entry.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<&str> = raw.split(':').collect();

        let (sha, filepath, count) = match segments.as_slice() {
            [sha, filepath] => (*sha, *filepath, None),
            [sha, filepath, count] => (*sha, *filepath, Some(*count)),
            _ => return None,
        };

        if !is_full_sha(sha) || filepath.is_empty() {
            return None;
        }

        let match_count = match count {
            Some(c) => Some(c.parse::<u64>().ok()?),
            None => None,
        };

        Some(Self {
            sha: sha.to_string(),
            filepath: filepath.to_string(),
            match_count,
        })
    }
}
