//! Serve command - run the webhook server

use crate::cli::context::CommandContext;
use eip_automerge::config::ServerConfig;
use eip_automerge::error::Result;
use eip_automerge::server::serve;

/// Run the webhook server until interrupted
pub async fn run_serve(config: ServerConfig) -> Result<()> {
    let ctx = CommandContext::new(config.github_host.clone()).await?;
    serve(&config, ctx.platforms).await
}
