//! GitHub token discovery

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use secrecy::SecretString;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// A resolved GitHub credential
#[derive(Debug)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: SecretString,
    /// Where the token came from
    pub source: AuthSource,
}

/// Resolve a GitHub token from the environment or the `gh` CLI
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_env(|key| std::env::var(key).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token: SecretString::from(token),
            source: AuthSource::EnvVar,
        });
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("no token in environment and gh unavailable: {e}")))?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no token in environment and `gh auth token` failed; set GITHUB_TOKEN".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("`gh auth token` returned nothing".to_string()));
    }

    debug!("using GitHub token from gh CLI");
    Ok(GitHubAuthConfig {
        token: SecretString::from(token),
        source: AuthSource::Cli,
    })
}

/// First non-blank token among [`TOKEN_ENV_VARS`]
fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
