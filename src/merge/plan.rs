//! Merge decision - pure functions
//!
//! Turns pre-fetched PR state and per-file evaluations into a `Decision`.
//! No I/O happens here - all data is passed in, making it easy to unit test.

use crate::check::EvaluationResult;
use crate::types::{MergeMethod, MergeRequest, MergeableState, PullRequest};

/// Commit message body for automatic merges
pub const MERGE_MESSAGE: &str = "
Hi, I'm a bot! This change was automatically merged because:

 - It only modifies existing draft EIP(s)
 - The creator of this PR is listed as an author on all modified EIP(s)
 - The build is passing
";

/// First lines of the comment explaining a refused merge
pub const COMMENT_PREAMBLE: &str = "Hi! I'm a bot, and I wanted to automerge your PR, but couldn't because of the following issue(s):\n\n";

/// Why the bot leaves a PR alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The PR is already merged
    AlreadyMerged,
    /// GitHub does not consider the PR ready to merge
    NotClean(MergeableState),
    /// No file touched a draft EIP that could be validated
    NoValidatedEips,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyMerged => write!(f, "already merged"),
            Self::NotClean(state) => write!(f, "mergeable state is {state}"),
            Self::NoValidatedEips => write!(f, "no draft EIPs validated"),
        }
    }
}

/// What to do with a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Squash-merge the pinned head
    Merge {
        /// EIPs updated by the PR, in file order
        eips: Vec<u64>,
        /// Merge parameters
        request: MergeRequest,
    },
    /// Explain on the PR why it was not merged
    Comment {
        /// Rejection reasons, in file order
        reasons: Vec<String>,
        /// Full comment text
        body: String,
    },
    /// Do nothing
    NoAction(SkipReason),
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge { eips, request } => {
                write!(f, "merge EIP(s) {} at {}", join_eips(eips), request.sha)
            }
            Self::Comment { reasons, .. } => write!(f, "comment: {}", reasons.join("; ")),
            Self::NoAction(reason) => write!(f, "no action ({reason})"),
        }
    }
}

/// Checks that gate any per-file work
///
/// Defers entirely to GitHub's own mergeability computation.
pub fn precondition(pr: &PullRequest) -> Option<SkipReason> {
    if pr.merged {
        return Some(SkipReason::AlreadyMerged);
    }
    if pr.mergeable_state != MergeableState::Clean {
        return Some(SkipReason::NotClean(pr.mergeable_state));
    }
    None
}

/// Title of the squash commit
pub fn merge_commit_title(eips: &[u64]) -> String {
    format!(
        "Automatically merged updates to draft EIP(s) {}",
        join_eips(eips)
    )
}

/// Comment text listing each reason as a bullet
pub fn comment_body(reasons: &[String]) -> String {
    let bullets: Vec<String> = reasons.iter().map(|r| format!(" - {r}")).collect();
    format!("{COMMENT_PREAMBLE}{}", bullets.join("\n"))
}

fn join_eips(eips: &[u64]) -> String {
    eips.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create the decision for a PR (PURE - no I/O, easily testable)
///
/// - Merge when no file was rejected and at least one EIP was validated
/// - Comment when something was rejected and at least one EIP was involved
/// - Otherwise do nothing, so PRs that never touched a usable EIP get no noise
#[must_use]
pub fn create_decision(pr: &PullRequest, evaluations: &[EvaluationResult]) -> Decision {
    if let Some(skip) = precondition(pr) {
        return Decision::NoAction(skip);
    }

    let mut eips: Vec<u64> = Vec::new();
    let mut reasons: Vec<String> = Vec::new();

    for evaluation in evaluations {
        for eip in &evaluation.eips {
            if !eips.contains(eip) {
                eips.push(*eip);
            }
        }
        if let Some(ref reason) = evaluation.reason {
            reasons.push(reason.clone());
        }
    }

    if eips.is_empty() {
        return Decision::NoAction(SkipReason::NoValidatedEips);
    }

    if reasons.is_empty() {
        let request = MergeRequest {
            title: merge_commit_title(&eips),
            message: MERGE_MESSAGE.to_string(),
            method: MergeMethod::Squash,
            sha: pr.head.sha.clone(),
        };
        return Decision::Merge { eips, request };
    }

    let body = comment_body(&reasons);
    Decision::Comment { reasons, body }
}
