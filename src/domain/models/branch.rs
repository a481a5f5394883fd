/// One branch as listed by `git branch -a`: a short name plus the remote it
/// was seen under, if any.
///
/// The same branch frequently appears twice, locally and as a remote-tracking
/// ref; both map to the same short name. Logical deduplication collapses them
/// for reporting, while commit discovery walks each listed ref independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    name: String,
    remote: Option<String>,
}

impl Branch {
    /// Parses one output line of `git branch -a --no-color`.
    ///
    /// Returns `None` for blank lines, detached-HEAD markers, and symbolic
    /// entries such as `remotes/origin/HEAD -> origin/main`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim().trim_start_matches("* ").trim();
        if trimmed.is_empty() || trimmed.contains("->") || trimmed.starts_with('(') {
            return None;
        }

        if let Some(rest) = trimmed.strip_prefix("remotes/") {
            let (remote, name) = rest.split_once('/')?;
            if name.is_empty() {
                return None;
            }
            return Some(Self {
                name: name.to_string(),
                remote: Some(remote.to_string()),
            });
        }

        Some(Self {
            name: trimmed.to_string(),
            remote: None,
        })
    }

    /// Short branch name, with any remote prefix stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// The revision spec to walk for this branch (`origin/main` for a
    /// remote-tracking ref, `main` for a local one).
    pub fn rev_spec(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{}/{}", remote, self.name),
            None => self.name.clone(),
        }
    }
}

/// Collapses duplicate short names, keeping the first occurrence.
/// `git branch -a` lists local branches first, so local wins over tracking.
pub fn dedup_logical(branches: &[Branch]) -> Vec<Branch> {
    let mut seen: Vec<&str> = Vec::new();
    let mut logical = Vec::new();
    for branch in branches {
        if seen.contains(&branch.name()) {
            continue;
        }
        seen.push(branch.name());
        logical.push(branch.clone());
    }
    logical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_branch_marker() {
        let branch = Branch::parse("* main").unwrap();
        assert_eq!(branch.name(), "main");
        assert!(!branch.is_remote());
        assert_eq!(branch.rev_spec(), "main");
    }

    #[test]
    fn test_parse_remote_tracking_ref() {
        let branch = Branch::parse("  remotes/origin/feature/login").unwrap();
        assert_eq!(branch.name(), "feature/login");
        assert!(branch.is_remote());
        assert_eq!(branch.rev_spec(), "origin/feature/login");
    }

    #[test]
    fn test_parse_skips_symbolic_head() {
        assert!(Branch::parse("  remotes/origin/HEAD -> origin/main").is_none());
    }

    #[test]
    fn test_parse_skips_detached_head() {
        assert!(Branch::parse("* (HEAD detached at 1a2b3c4)").is_none());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        assert!(Branch::parse("   ").is_none());
    }

    #[test]
    fn test_dedup_prefers_local_over_tracking() {
        let branches = vec![
            Branch::parse("* main").unwrap(),
            Branch::parse("  remotes/origin/main").unwrap(),
            Branch::parse("  remotes/origin/dev").unwrap(),
        ];

        let logical = dedup_logical(&branches);
        assert_eq!(logical.len(), 2);
        assert_eq!(logical[0].name(), "main");
        assert!(!logical[0].is_remote());
        assert_eq!(logical[1].name(), "dev");
        assert!(logical[1].is_remote());
    }
}
