//! automerge - webhook service that auto-merges draft EIP updates

mod cli;

use clap::{Parser, Subcommand};
use eip_automerge::config::{DEFAULT_BIND, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "automerge", version, about = "Auto-merge pull requests that only touch draft EIPs")]
struct Cli {
    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, global = true, env = "GITHUB_HOST")]
    github_host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve {
        /// Address to listen on
        #[arg(long, env = "AUTOMERGE_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Decide but never merge or comment
        #[arg(long, env = "AUTOMERGE_DRY_RUN")]
        dry_run: bool,
    },
    /// Check a single pull request now
    Check {
        /// Repository as owner/name
        repo: String,

        /// Pull request number
        pr: u64,

        /// Show the decision without merging or commenting
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Serve { bind, dry_run } => {
            cli::run_serve(ServerConfig {
                bind,
                github_host: args.github_host,
                dry_run,
            })
            .await?;
        }
        Commands::Check { repo, pr, dry_run } => {
            cli::run_check(&repo, pr, args.github_host, dry_run).await?;
        }
    }

    Ok(())
}
