//! Service configuration

use std::net::SocketAddr;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Settings for the webhook server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: SocketAddr,
    /// GitHub Enterprise host (None for github.com)
    pub github_host: Option<String>,
    /// Decide but never merge or comment
    pub dry_run: bool,
}
