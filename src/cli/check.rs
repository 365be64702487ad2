//! Check command - evaluate one PR from the terminal

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use eip_automerge::error::Result;
use eip_automerge::merge::{CheckOptions, CheckReport, Decision, check_pull_request};
use eip_automerge::platform::parse_repo_name;

/// Check a PR, merging or commenting unless `dry_run` is set
pub async fn run_check(
    repo: &str,
    pr_number: u64,
    github_host: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let repo = parse_repo_name(repo)?;
    let ctx = CommandContext::new(github_host).await?;
    let platform = ctx.platforms.for_repo(&repo)?;

    println!(
        "{} {}",
        "Checking".emphasis(),
        format!("{repo}#{pr_number}").accent()
    );

    let report = check_pull_request(platform.as_ref(), pr_number, CheckOptions { dry_run }).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &CheckReport) {
    for evaluation in &report.evaluations {
        match (&evaluation.reason, evaluation.eips.first()) {
            (None, Some(eip)) => {
                println!("  {} {} (EIP {eip})", check(), evaluation.path);
            }
            (None, None) => println!("  {}", format!("- {} (ignored)", evaluation.path).muted()),
            (Some(reason), _) => println!("  {} {}", cross(), reason.warn()),
        }
    }

    if let Decision::Comment { body, .. } = &report.decision {
        println!();
        println!("{}", body.muted());
    }

    println!();
    println!("{}", report.to_string().emphasis());
}
