use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::application::VcsClient;
use crate::domain::{
    Branch, CommitId, CommitMeta, DomainError, RepositoryHandle, SearchPredicate,
};

const MAX_MATERIALIZE_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// [`VcsClient`] implementation over the `git` command-line tool.
///
/// Everything is read-only except materialization: branch and commit
/// discovery use reachability queries (`rev-list`), never checkouts, so the
/// working tree is not mutated during a scan.
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, args: &[String]) -> Result<std::process::Output, DomainError> {
        Command::new("git")
            .args(args)
            .output()
            .await
            .map_err(|e| DomainError::vcs(format!("Failed to execute git: {}", e)))
    }

    /// Runs git and returns stdout, treating a non-zero exit as an error.
    async fn run_checked(&self, args: &[String]) -> Result<String, DomainError> {
        let output = self.run(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::vcs(format!(
                "git {} failed: {}",
                args.first().map(String::as_str).unwrap_or(""),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn clone_repo(&self, url: &str, local_path: &Path) -> Result<(), DomainError> {
        info!("Cloning {} to {}...", url, local_path.display());
        self.run_checked(&[
            "clone".to_string(),
            "-q".to_string(),
            url.to_string(),
            local_path.to_string_lossy().into_owned(),
        ])
        .await
        .map(|_| ())
    }

    async fn pull(&self, local_path: &Path) -> Result<(), DomainError> {
        info!("Updating existing checkout at {}...", local_path.display());
        self.run_checked(&[
            "-C".to_string(),
            local_path.to_string_lossy().into_owned(),
            "pull".to_string(),
            "-q".to_string(),
            "--ff-only".to_string(),
        ])
        .await
        .map(|_| ())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VcsClient for GitCli {
    async fn materialize(&self, handle: &RepositoryHandle) -> Result<PathBuf, DomainError> {
        let local_path = handle.local_path();

        let url = match handle.url() {
            Some(url) => url,
            None => {
                // Purely local repositories are used as-is.
                return if local_path.is_dir() {
                    Ok(local_path.to_path_buf())
                } else {
                    Err(DomainError::materialize(format!(
                        "Local repository {} does not exist",
                        local_path.display()
                    )))
                };
            }
        };

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::materialize(format!(
                    "Failed to create clones directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut last_error = None;
        for attempt in 1..=MAX_MATERIALIZE_ATTEMPTS {
            let result = if local_path.is_dir() {
                self.pull(local_path).await
            } else {
                self.clone_repo(url, local_path).await
            };

            match result {
                Ok(()) => return Ok(local_path.to_path_buf()),
                Err(e) => {
                    if attempt < MAX_MATERIALIZE_ATTEMPTS {
                        warn!(
                            "Attempt {}/{} to materialize {} failed: {}",
                            attempt,
                            MAX_MATERIALIZE_ATTEMPTS,
                            handle.name(),
                            e
                        );
                        tokio::time::sleep(RETRY_BASE_DELAY * attempt).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(DomainError::materialize(format!(
            "Giving up on {} after {} attempts: {}",
            handle.name(),
            MAX_MATERIALIZE_ATTEMPTS,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    async fn list_branches(&self, local_path: &Path) -> Result<Vec<Branch>, DomainError> {
        let stdout = self
            .run_checked(&[
                "-C".to_string(),
                local_path.to_string_lossy().into_owned(),
                "branch".to_string(),
                "-a".to_string(),
                "--no-color".to_string(),
            ])
            .await?;

        Ok(stdout.lines().filter_map(Branch::parse).collect())
    }

    async fn list_commits(
        &self,
        local_path: &Path,
        branch: &Branch,
    ) -> Result<Vec<CommitId>, DomainError> {
        let stdout = self
            .run_checked(&[
                "-C".to_string(),
                local_path.to_string_lossy().into_owned(),
                "rev-list".to_string(),
                branch.rev_spec(),
            ])
            .await?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(CommitId::new)
            .collect())
    }

    async fn grep_commit(
        &self,
        local_path: &Path,
        commit: &CommitId,
        predicate: &SearchPredicate,
    ) -> Result<Vec<String>, DomainError> {
        let mut args = vec![
            "-C".to_string(),
            local_path.to_string_lossy().into_owned(),
            "grep".to_string(),
            "-c".to_string(),
            "-E".to_string(),
        ];
        for (i, pattern) in predicate.patterns().iter().enumerate() {
            if i > 0 {
                args.push("--or".to_string());
            }
            args.push("-e".to_string());
            args.push(pattern.clone());
        }
        args.push(commit.as_str().to_string());

        let output = self.run(&args).await?;
        if !output.status.success() {
            // Exit 1 means no match; other failures (binary content, odd
            // encodings) are indistinguishable from it and collapse to the
            // same empty answer.
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                debug!("git grep on {}: {}", commit, stderr.trim());
            }
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    async fn branches_containing(
        &self,
        local_path: &Path,
        commit: &CommitId,
    ) -> Result<Vec<String>, DomainError> {
        let stdout = self
            .run_checked(&[
                "-C".to_string(),
                local_path.to_string_lossy().into_owned(),
                "branch".to_string(),
                "--contains".to_string(),
                commit.as_str().to_string(),
                "--no-color".to_string(),
            ])
            .await?;

        Ok(stdout
            .lines()
            .filter_map(Branch::parse)
            .map(|b| b.name().to_string())
            .collect())
    }

    async fn commit_meta(
        &self,
        local_path: &Path,
        commit: &CommitId,
    ) -> Result<CommitMeta, DomainError> {
        // %x1f keeps the fields unambiguous regardless of what author names
        // contain.
        let stdout = self
            .run_checked(&[
                "-C".to_string(),
                local_path.to_string_lossy().into_owned(),
                "show".to_string(),
                "-s".to_string(),
                "--format=%an%x1f%ae%x1f%aI".to_string(),
                commit.as_str().to_string(),
            ])
            .await?;

        let line = stdout.trim();
        let mut fields = line.split('\u{1f}');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(author), Some(email), Some(time), None) => Ok(CommitMeta {
                author: author.to_string(),
                email: email.to_string(),
                commit_time: time.to_string(),
            }),
            _ => Err(DomainError::vcs(format!(
                "Unexpected metadata format for {}: {:?}",
                commit, line
            ))),
        }
    }
}
