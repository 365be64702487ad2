//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use eip_automerge::error::{Error, Result};
use eip_automerge::platform::{PlatformFactory, PlatformService};
use eip_automerge::types::{
    ChangedFile, MergeRequest, MergeResult, PlatformConfig, PrComment, PullRequest, RepoName,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Call record for `get_file_content`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCall {
    pub repo: RepoName,
    pub path: String,
    pub sha: String,
}

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub request: MergeRequest,
}

/// Simple mock platform service for testing
///
/// Features:
/// - File contents keyed by (sha, path), stored as plain text and served
///   base64-encoded like the real API
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    current_user: String,
    next_comment_id: AtomicU64,
    pull_requests: Mutex<HashMap<u64, PullRequest>>,
    files: Mutex<HashMap<u64, Vec<ChangedFile>>>,
    contents: Mutex<HashMap<(String, String), String>>,
    comments: Mutex<HashMap<u64, Vec<PrComment>>>,
    merge_response: Mutex<Option<MergeResult>>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    list_files_calls: Mutex<Vec<u64>>,
    content_calls: Mutex<Vec<ContentCall>>,
    list_comments_calls: Mutex<Vec<u64>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_list_files: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config, authenticated as `eip-bot`
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            current_user: "eip-bot".to_string(),
            next_comment_id: AtomicU64::new(1000),
            pull_requests: Mutex::new(HashMap::new()),
            files: Mutex::new(HashMap::new()),
            contents: Mutex::new(HashMap::new()),
            comments: Mutex::new(HashMap::new()),
            merge_response: Mutex::new(None),
            get_pr_calls: Mutex::new(Vec::new()),
            list_files_calls: Mutex::new(Vec::new()),
            content_calls: Mutex::new(Vec::new()),
            list_comments_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_list_files: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    /// Login the mock reports for `current_user`
    pub fn bot_login(&self) -> &str {
        &self.current_user
    }

    // === Error injection methods ===

    /// Make `get_pull_request` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_pr_files` return an error
    pub fn fail_list_files(&self, msg: &str) {
        *self.error_on_list_files.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Response setup ===

    /// Register a PR
    pub fn set_pull_request(&self, pr: PullRequest) {
        self.pull_requests.lock().unwrap().insert(pr.number, pr);
    }

    /// Set the files a PR touches
    pub fn set_files(&self, pr_number: u64, files: Vec<ChangedFile>) {
        self.files.lock().unwrap().insert(pr_number, files);
    }

    /// Set a file's text at a commit (served base64-encoded)
    pub fn set_content(&self, sha: &str, path: &str, text: &str) {
        self.contents
            .lock()
            .unwrap()
            .insert((sha.to_string(), path.to_string()), STANDARD.encode(text));
    }

    /// Set a file's raw encoded content at a commit
    pub fn set_raw_content(&self, sha: &str, path: &str, encoded: &str) {
        self.contents
            .lock()
            .unwrap()
            .insert((sha.to_string(), path.to_string()), encoded.to_string());
    }

    /// Add an existing comment to a PR
    pub fn add_comment(&self, pr_number: u64, author: &str, body: &str, created_at: DateTime<Utc>) {
        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        self.comments
            .lock()
            .unwrap()
            .entry(pr_number)
            .or_default()
            .push(PrComment {
                id,
                author: author.to_string(),
                body: body.to_string(),
                created_at,
            });
    }

    /// Set the response for `merge_pr`
    pub fn set_merge_response(&self, result: MergeResult) {
        *self.merge_response.lock().unwrap() = Some(result);
    }

    // === Call verification methods ===

    /// Get all `get_pull_request` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all `list_pr_files` calls
    pub fn get_list_files_calls(&self) -> Vec<u64> {
        self.list_files_calls.lock().unwrap().clone()
    }

    /// Get all `get_file_content` calls
    pub fn get_content_calls(&self) -> Vec<ContentCall> {
        self.content_calls.lock().unwrap().clone()
    }

    /// Get all `list_pr_comments` calls
    pub fn get_list_comments_calls(&self) -> Vec<u64> {
        self.list_comments_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr_comment` calls
    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that nothing was merged or commented
    pub fn assert_no_side_effects(&self) {
        let merges = self.get_merge_pr_calls();
        let comments = self.get_create_comment_calls();
        assert!(merges.is_empty(), "Expected no merges but got: {merges:?}");
        assert!(
            comments.is_empty(),
            "Expected no comments but got: {comments:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        self.pull_requests
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("no PR #{pr_number} configured")))
    }

    async fn list_pr_files(&self, pr_number: u64) -> Result<Vec<ChangedFile>> {
        self.list_files_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_list_files.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .files
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_file_content(&self, repo: &RepoName, path: &str, sha: &str) -> Result<String> {
        self.content_calls.lock().unwrap().push(ContentCall {
            repo: repo.clone(),
            path: path.to_string(),
            sha: sha.to_string(),
        });

        self.contents
            .lock()
            .unwrap()
            .get(&(sha.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| Error::Platform(format!("404: {path} not found at {sha}")))
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        self.list_comments_calls.lock().unwrap().push(pr_number);
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });
        Ok(())
    }

    async fn current_user(&self) -> Result<String> {
        Ok(self.current_user.clone())
    }

    async fn merge_pr(&self, pr_number: u64, request: &MergeRequest) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number,
            request: request.clone(),
        });

        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .merge_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: None,
            }))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// Factory handing out one shared mock, recording which repos were asked for
pub struct MockPlatformFactory {
    pub platform: Arc<MockPlatformService>,
    repos: Mutex<Vec<RepoName>>,
}

impl MockPlatformFactory {
    pub fn new(platform: Arc<MockPlatformService>) -> Self {
        Self {
            platform,
            repos: Mutex::new(Vec::new()),
        }
    }

    /// Repositories requested so far
    pub fn requested_repos(&self) -> Vec<RepoName> {
        self.repos.lock().unwrap().clone()
    }
}

impl PlatformFactory for MockPlatformFactory {
    fn for_repo(&self, repo: &RepoName) -> Result<Arc<dyn PlatformService>> {
        self.repos.lock().unwrap().push(repo.clone());
        Ok(self.platform.clone())
    }
}
