//! Shared command context for CLI commands
//!
//! Resolves the GitHub credential once and hands out repository clients.

use eip_automerge::auth::get_github_auth;
use eip_automerge::error::Result;
use eip_automerge::platform::{GitHubFactory, PlatformFactory};
use std::sync::Arc;
use tracing::debug;

/// Shared context for commands that talk to GitHub
pub struct CommandContext {
    /// Factory for repository clients
    pub platforms: Arc<dyn PlatformFactory>,
}

impl CommandContext {
    /// Resolve auth and build the platform factory
    pub async fn new(github_host: Option<String>) -> Result<Self> {
        let auth = get_github_auth().await?;
        debug!(source = ?auth.source, "resolved GitHub auth");

        Ok(Self {
            platforms: Arc::new(GitHubFactory::new(auth.token, github_host)),
        })
    }
}
