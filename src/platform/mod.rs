//! Repository client for GitHub
//!
//! Provides the narrow set of PR operations the merge policy needs.

mod factory;
mod github;

pub use factory::{GitHubFactory, PlatformFactory, parse_repo_name};
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    ChangedFile, MergeRequest, MergeResult, PlatformConfig, PrComment, PullRequest, RepoName,
};
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// One service is bound to one repository. The decision engine only ever
/// talks to this trait, so tests can swap in a mock.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch a PR with its merge state, author, and pinned revisions
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest>;

    /// List the files a PR touches, in the order GitHub reports them
    async fn list_pr_files(&self, pr_number: u64) -> Result<Vec<ChangedFile>>;

    /// Fetch a file at a given commit
    ///
    /// `repo` may differ from the configured repository when the PR head
    /// lives in a fork. Returns the base64 content exactly as the API
    /// delivers it.
    async fn get_file_content(&self, repo: &RepoName, path: &str, sha: &str) -> Result<String>;

    /// List comments on a PR, oldest first
    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Login of the account this service authenticates as
    async fn current_user(&self) -> Result<String>;

    /// Merge a PR
    async fn merge_pr(&self, pr_number: u64, request: &MergeRequest) -> Result<MergeResult>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
