//! Error types for eip-automerge

use thiserror::Error;

/// Errors surfaced by the automerge service
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API returned an error we translated ourselves
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Raw octocrab failure
    #[error("GitHub client error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Generic repository client failure (used by test doubles too)
    #[error("platform error: {0}")]
    Platform(String),

    /// Repository name was not of the form `owner/name`
    #[error("invalid repository name: {0}")]
    InvalidRepo(String),

    /// File content could not be decoded or its front matter parsed
    #[error("document error: {0}")]
    Document(String),

    /// No usable access token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration or inbound payload
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
