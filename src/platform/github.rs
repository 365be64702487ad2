//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PlatformService, parse_repo_name};
use crate::types::{
    ChangedFile, FileStatus, MergeMethod, MergeRequest, MergeResult, MergeableState,
    PlatformConfig, PrAuthor, PrComment, PullRequest, RepoName, RevisionRef,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::Repository;
use octocrab::models::repos::DiffEntryStatus;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::borrow::Borrow;
use tracing::debug;

/// Public profile fields we need beyond what the PR payload carries
#[derive(Deserialize)]
struct UserProfile {
    email: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service bound to `repo`
    pub fn new(token: &SecretString, repo: RepoName, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig { repo, host },
        })
    }

    fn owner(&self) -> &str {
        &self.config.repo.owner
    }

    fn repo(&self) -> &str {
        &self.config.repo.name
    }

    /// Look up the public email of a user, if any
    ///
    /// The PR payload never includes it, so this is a separate call. A
    /// failure here only means email matching is unavailable.
    async fn user_email(&self, login: &str) -> Option<String> {
        let route = format!("/users/{login}");
        match self
            .client
            .get::<UserProfile, _, ()>(route, None::<&()>)
            .await
        {
            Ok(profile) => profile.email.filter(|e| !e.is_empty()),
            Err(e) => {
                debug!(login, error = %e, "could not fetch user profile");
                None
            }
        }
    }

    /// Resolve the repository of a PR side, falling back to the bound repo
    ///
    /// Head repositories disappear when a fork is deleted; the head commit
    /// is still reachable through the base repository.
    fn side_repo<R: Borrow<Repository>>(&self, repo: Option<&R>) -> RepoName {
        repo.map(Borrow::borrow).and_then(|r: &Repository| {
            r.full_name
                .as_deref()
                .and_then(|full| parse_repo_name(full).ok())
                .or_else(|| {
                    r.owner
                        .as_ref()
                        .map(|owner| RepoName::new(owner.login.clone(), r.name.clone()))
                })
        })
        .unwrap_or_else(|| self.config.repo.clone())
    }
}

fn mergeable_state_from_octocrab(
    state: Option<&octocrab::models::pulls::MergeableState>,
) -> MergeableState {
    use octocrab::models::pulls::MergeableState as Gh;
    match state {
        Some(Gh::Clean) => MergeableState::Clean,
        Some(Gh::Dirty) => MergeableState::Dirty,
        Some(Gh::Unstable) => MergeableState::Unstable,
        Some(Gh::Blocked) => MergeableState::Blocked,
        Some(Gh::Behind) => MergeableState::Behind,
        // MergeableState is non-exhaustive
        Some(_) | None => MergeableState::Unknown,
    }
}

const fn file_status_from_octocrab(status: &DiffEntryStatus) -> FileStatus {
    match status {
        DiffEntryStatus::Added => FileStatus::Added,
        DiffEntryStatus::Modified => FileStatus::Modified,
        DiffEntryStatus::Removed => FileStatus::Removed,
        DiffEntryStatus::Renamed => FileStatus::Renamed,
        _ => FileStatus::Other,
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");

        let pr = self
            .client
            .pulls(self.owner(), self.repo())
            .get(pr_number)
            .await?;

        let login = pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} has no author")))?;
        let email = self.user_email(&login).await;

        let result = PullRequest {
            number: pr.number,
            merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
            mergeable_state: mergeable_state_from_octocrab(pr.mergeable_state.as_ref()),
            author: PrAuthor { login, email },
            base: RevisionRef {
                repo: self.side_repo(pr.base.repo.as_ref()),
                ref_name: pr.base.ref_field.clone(),
                sha: pr.base.sha.clone(),
            },
            head: RevisionRef {
                repo: self.side_repo(pr.head.repo.as_ref()),
                ref_name: pr.head.ref_field.clone(),
                sha: pr.head.sha.clone(),
            },
        };

        debug!(
            pr_number,
            merged = result.merged,
            mergeable_state = %result.mergeable_state,
            author = %result.author.login,
            "got PR"
        );
        Ok(result)
    }

    async fn list_pr_files(&self, pr_number: u64) -> Result<Vec<ChangedFile>> {
        debug!(pr_number, "listing PR files");

        let page = self
            .client
            .pulls(self.owner(), self.repo())
            .list_files(pr_number)
            .await?;
        let entries = self.client.all_pages(page).await?;

        let result: Vec<ChangedFile> = entries
            .into_iter()
            .map(|entry| ChangedFile {
                status: file_status_from_octocrab(&entry.status),
                path: entry.filename,
            })
            .collect();
        debug!(pr_number, count = result.len(), "listed PR files");
        Ok(result)
    }

    async fn get_file_content(&self, repo: &RepoName, path: &str, sha: &str) -> Result<String> {
        debug!(%repo, path, sha, "getting file content");

        let items = self
            .client
            .repos(&repo.owner, &repo.name)
            .get_content()
            .path(path)
            .r#ref(sha)
            .send()
            .await?;

        items
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content)
            .ok_or_else(|| Error::GitHubApi(format!("no content for {path} at {sha} in {repo}")))
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        debug!(pr_number, "listing PR comments");

        let page = self
            .client
            .issues(self.owner(), self.repo())
            .list_comments(pr_number)
            .per_page(100)
            .send()
            .await?;
        let comments = self.client.all_pages(page).await?;

        let result: Vec<PrComment> = comments
            .into_iter()
            .map(|c| PrComment {
                id: c.id.0,
                author: c.user.login,
                body: c.body.unwrap_or_default(),
                created_at: c.created_at,
            })
            .collect();
        debug!(pr_number, count = result.len(), "listed PR comments");
        Ok(result)
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        self.client
            .issues(self.owner(), self.repo())
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, "created PR comment");
        Ok(())
    }

    async fn current_user(&self) -> Result<String> {
        let me = self.client.current().user().await?;
        debug!(login = %me.login, "resolved current user");
        Ok(me.login)
    }

    async fn merge_pr(&self, pr_number: u64, request: &MergeRequest) -> Result<MergeResult> {
        debug!(pr_number, method = %request.method, sha = %request.sha, "merging PR");

        let octocrab_method = match request.method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(self.owner(), self.repo())
            .merge(pr_number)
            .method(octocrab_method)
            .title(request.title.clone())
            .message(request.message.clone())
            .sha(request.sha.clone())
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
