//! Decision execution - effectful operations
//!
//! Takes a `Decision` (created by the pure planning functions) and carries
//! it out via the platform API.

use crate::error::Result;
use crate::merge::plan::Decision;
use crate::platform::PlatformService;
use tracing::{info, warn};

/// What actually happened when a decision was executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The PR was merged
    Merged {
        /// SHA of the merge commit, if GitHub reported one
        sha: Option<String>,
    },
    /// GitHub answered the merge call without merging
    MergeRefused {
        /// GitHub's explanation
        message: Option<String>,
    },
    /// A comment was posted
    Commented,
    /// The same comment was already the bot's latest; nothing posted
    CommentSuppressed,
    /// The decision required no action
    NothingToDo,
    /// Dry run: the decision was reported but not executed
    DryRun,
}

/// Post `body` unless the bot's most recent comment already says exactly that
///
/// Only the latest self-authored comment is compared, so a changed set of
/// reasons is always posted. Returns whether a comment was created.
pub async fn post_comment_once(
    platform: &dyn PlatformService,
    pr_number: u64,
    body: &str,
) -> Result<bool> {
    let me = platform.current_user().await?;
    let mut comments = platform.list_pr_comments(pr_number).await?;
    // Stable sort keeps API order for equal timestamps
    comments.sort_by_key(|c| c.created_at);

    if let Some(latest) = comments.iter().rev().find(|c| c.author == me)
        && latest.body == body
    {
        info!(pr_number, comment_id = latest.id, "refusing to post identical comment");
        return Ok(false);
    }

    platform.create_pr_comment(pr_number, body).await?;
    Ok(true)
}

/// Execute a decision (EFFECTFUL)
pub async fn execute_decision(
    decision: &Decision,
    pr_number: u64,
    platform: &dyn PlatformService,
) -> Result<ExecutionOutcome> {
    match decision {
        Decision::Merge { eips, request } => {
            info!(pr_number, ?eips, sha = %request.sha, "merging PR");
            let result = platform.merge_pr(pr_number, request).await?;
            if result.merged {
                Ok(ExecutionOutcome::Merged { sha: result.sha })
            } else {
                warn!(pr_number, message = ?result.message, "merge not performed");
                Ok(ExecutionOutcome::MergeRefused {
                    message: result.message,
                })
            }
        }
        Decision::Comment { reasons, body } => {
            info!(pr_number, count = reasons.len(), "commenting on PR");
            if post_comment_once(platform, pr_number, body).await? {
                Ok(ExecutionOutcome::Commented)
            } else {
                Ok(ExecutionOutcome::CommentSuppressed)
            }
        }
        Decision::NoAction(reason) => {
            info!(pr_number, %reason, "no action");
            Ok(ExecutionOutcome::NothingToDo)
        }
    }
}
