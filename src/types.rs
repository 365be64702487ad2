//! Core types for eip-automerge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository identified by owner and name (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoName {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoName {
    /// Create a repo name from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Platform configuration for one repository
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository the service talks to
    pub repo: RepoName,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// GitHub's computed merge readiness for a PR
///
/// Only `Clean` allows the bot to act; everything else defers to humans
/// or to a later webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeableState {
    /// No conflicts, required checks passing
    Clean,
    /// Merge conflicts
    Dirty,
    /// Mergeable but non-required checks failing
    Unstable,
    /// Blocked by branch protection
    Blocked,
    /// Head is behind base
    Behind,
    /// Not computed yet, or a state we don't model
    Unknown,
}

impl std::fmt::Display for MergeableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Dirty => write!(f, "dirty"),
            Self::Unstable => write!(f, "unstable"),
            Self::Blocked => write!(f, "blocked"),
            Self::Behind => write!(f, "behind"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The account that opened a PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrAuthor {
    /// Account handle (without `@`)
    pub login: String,
    /// Public email, if the account exposes one
    pub email: Option<String>,
}

/// One side (base or head) of a PR, pinned to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRef {
    /// Repository holding the commit (the head may live in a fork)
    pub repo: RepoName,
    /// Branch name
    pub ref_name: String,
    /// Exact commit SHA
    pub sha: String,
}

/// A pull request, as far as the merge policy cares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Whether the PR has already been merged
    pub merged: bool,
    /// GitHub's merge readiness
    pub mergeable_state: MergeableState,
    /// Who opened the PR
    pub author: PrAuthor,
    /// Target side
    pub base: RevisionRef,
    /// Source side
    pub head: RevisionRef,
}

/// How a file was touched by a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// New file
    Added,
    /// Content changed
    Modified,
    /// File deleted
    Removed,
    /// File moved (path is the new location)
    Renamed,
    /// Anything else GitHub reports (copied, changed, unchanged)
    Other,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
            Self::Removed => write!(f, "removed"),
            Self::Renamed => write!(f, "renamed"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A file touched by a PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path
    pub path: String,
    /// Change kind
    pub status: FileStatus,
}

impl ChangedFile {
    /// Create a changed-file entry
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// A comment on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrComment {
    /// Comment ID
    pub id: u64,
    /// Login of the comment author
    pub author: String,
    /// Comment body text
    pub body: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Everything the platform needs to merge a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Commit title
    pub title: String,
    /// Commit message body
    pub message: String,
    /// Merge method to use
    pub method: MergeMethod,
    /// Head SHA the merge is pinned to
    pub sha: String,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}
