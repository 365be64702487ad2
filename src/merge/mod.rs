//! Merge engine for draft EIP pull requests
//!
//! Three-phase pattern:
//! 1. Gather - fetch the PR and evaluate each changed file (effectful)
//! 2. Plan - create a `Decision` (pure, testable)
//! 3. Execute - merge or comment (effectful)

mod execute;
mod plan;

pub use execute::{ExecutionOutcome, execute_decision, post_comment_once};
pub use plan::{
    COMMENT_PREAMBLE, Decision, MERGE_MESSAGE, SkipReason, comment_body, create_decision,
    merge_commit_title, precondition,
};

use crate::check::{EvaluationResult, evaluate_file};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::PullRequest;
use tracing::info;

/// Options for a PR check
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Decide but don't merge or comment
    pub dry_run: bool,
}

/// Result of checking one PR end to end
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// PR number
    pub pr_number: u64,
    /// Per-file evaluations (empty when a precondition failed)
    pub evaluations: Vec<EvaluationResult>,
    /// The decision taken
    pub decision: Decision,
    /// What executing it did
    pub outcome: ExecutionOutcome,
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.pr_number;
        match (&self.decision, &self.outcome) {
            (_, ExecutionOutcome::DryRun) => write!(f, "PR {n}: would {}", self.decision),
            (_, ExecutionOutcome::Merged { .. }) => write!(f, "Merging PR {n}!"),
            (_, ExecutionOutcome::MergeRefused { message }) => write!(
                f,
                "PR {n} was not merged: {}",
                message.as_deref().unwrap_or("no reason given")
            ),
            (_, ExecutionOutcome::Commented) => write!(f, "Commented on PR {n}"),
            (_, ExecutionOutcome::CommentSuppressed) => {
                write!(f, "PR {n} already has this comment")
            }
            (Decision::NoAction(reason), ExecutionOutcome::NothingToDo) => {
                write!(f, "Nothing to do for PR {n}: {reason}")
            }
            (_, ExecutionOutcome::NothingToDo) => write!(f, "Nothing to do for PR {n}"),
        }
    }
}

/// Evaluate every changed file of `pr`, in the order GitHub lists them
///
/// Per-file failures are contained in the results; only the file listing
/// itself can fail.
pub async fn gather_evaluations(
    platform: &dyn PlatformService,
    pr: &PullRequest,
) -> Result<Vec<EvaluationResult>> {
    let files = platform.list_pr_files(pr.number).await?;
    let mut evaluations = Vec::with_capacity(files.len());

    for file in &files {
        let evaluation = evaluate_file(platform, pr, file).await;
        if let Some(ref reason) = evaluation.reason {
            info!(pr = pr.number, path = %file.path, %reason, "file rejected");
        }
        evaluations.push(evaluation);
    }

    Ok(evaluations)
}

/// Check a PR and merge or comment on it
pub async fn check_pull_request(
    platform: &dyn PlatformService,
    pr_number: u64,
    options: CheckOptions,
) -> Result<CheckReport> {
    info!(pr_number, repo = %platform.config().repo, "checking PR");
    let pr = platform.get_pull_request(pr_number).await?;

    let evaluations = if let Some(skip) = precondition(&pr) {
        info!(pr_number, reason = %skip, "quitting");
        Vec::new()
    } else {
        gather_evaluations(platform, &pr).await?
    };

    let decision = create_decision(&pr, &evaluations);

    let outcome = if options.dry_run {
        info!(pr_number, %decision, "dry run");
        ExecutionOutcome::DryRun
    } else {
        execute_decision(&decision, pr_number, platform).await?
    };

    Ok(CheckReport {
        pr_number,
        evaluations,
        decision,
        outcome,
    })
}
