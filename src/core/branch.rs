//! Branch resolution and matching between the two repositories.
//!
//! ngconsole branches are named `{version}-dev` or `{version}-OEM-{name}`,
//! ngconsole_resources branches are named `{version}`.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Source of the currently checked-out branch of a repository.
#[async_trait]
pub trait BranchSource: Send + Sync {
    async fn current_branch(&self, repo: &Path) -> Result<String>;
}

/// Reads the current branch by running `git branch` in the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

#[async_trait]
impl BranchSource for GitCli {
    async fn current_branch(&self, repo: &Path) -> Result<String> {
        let output = Command::new("git")
            .args(["branch", "--no-color"])
            .current_dir(repo)
            .output()
            .await
            .map_err(|e| Error::Process {
                repo: repo.to_path_buf(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Process {
                repo: repo.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let branch = parse_current_branch(&String::from_utf8_lossy(&output.stdout)).ok_or_else(
            || Error::NoCurrentBranch {
                repo: repo.to_path_buf(),
            },
        )?;
        tracing::debug!(repo = %repo.display(), %branch, "resolved current branch");
        Ok(branch)
    }
}

/// Extracts the branch marked with `*` from `git branch` output.
pub fn parse_current_branch(output: &str) -> Option<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix('*'))
        .map(str::trim)
        .filter(|branch| !branch.is_empty())
        .last()
        .map(String::from)
}

/// Whether an ngconsole branch and an ngconsole_resources branch belong to
/// the same release line.
///
/// ```
/// use vdife::core::branches_match;
///
/// assert!(branches_match("1.0-dev", "1.0"));
/// assert!(branches_match("1.0-OEM-acme", "1.0"));
/// assert!(!branches_match("1.0-beta-x", "1.0"));
/// ```
pub fn branches_match(app_branch: &str, resource_branch: &str) -> bool {
    match app_branch.split('-').collect::<Vec<_>>().as_slice() {
        [version, "dev"] | [version, "OEM", _] => *version == resource_branch,
        _ => false,
    }
}
