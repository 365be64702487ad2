//! Building platform services per repository

use crate::error::{Error, Result};
use crate::platform::{GitHubService, PlatformService};
use crate::types::RepoName;
use secrecy::SecretString;
use std::sync::Arc;

/// Creates a [`PlatformService`] bound to a repository
///
/// Webhook deliveries name arbitrary repositories, so the server holds a
/// factory rather than a single service.
pub trait PlatformFactory: Send + Sync {
    /// Create a service for `repo`
    fn for_repo(&self, repo: &RepoName) -> Result<Arc<dyn PlatformService>>;
}

/// Factory producing [`GitHubService`] instances sharing one token
pub struct GitHubFactory {
    token: SecretString,
    host: Option<String>,
}

impl GitHubFactory {
    /// Create a factory for github.com or a GitHub Enterprise host
    pub const fn new(token: SecretString, host: Option<String>) -> Self {
        Self { token, host }
    }
}

impl PlatformFactory for GitHubFactory {
    fn for_repo(&self, repo: &RepoName) -> Result<Arc<dyn PlatformService>> {
        let service = GitHubService::new(&self.token, repo.clone(), self.host.clone())?;
        Ok(Arc::new(service))
    }
}

/// Parse an `owner/name` repository string
///
/// Surrounding whitespace and slashes are ignored; anything other than
/// exactly two non-empty segments is rejected.
pub fn parse_repo_name(full_name: &str) -> Result<RepoName> {
    let trimmed = full_name.trim().trim_matches('/');
    let mut parts = trimmed.split('/');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Ok(RepoName::new(owner, name))
        }
        _ => Err(Error::InvalidRepo(full_name.to_string())),
    }
}
