//! Evaluation of a single changed file
//!
//! Rules run cheapest first and stop at the first rejection:
//! path filter, new-file check, base revision checks, head revision checks.
//! Only the two revision checks touch the network.

use crate::check::{EvaluationResult, authors::is_listed_author};
use crate::document::{DocumentRevision, EIP_KEY, STATUS_KEY};
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{ChangedFile, FileStatus, PrAuthor, PullRequest, RevisionRef};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Status a document must hold on both sides of the change
pub const DRAFT_STATUS: &str = "Draft";

static EIP_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EIPS/eip-([0-9]+)\.md$").expect("valid EIP path regex"));

/// EIP number encoded in a path like `EIPS/eip-1234.md`
///
/// Returns `None` for any other path, including numbers too large for `u64`.
pub fn parse_eip_path(path: &str) -> Option<u64> {
    EIP_PATH_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Rules applied to the document as it exists on the base branch
///
/// Returns the rejection reason, if any.
pub fn check_base_revision(
    eip: u64,
    path: &str,
    base: &DocumentRevision,
    author: &PrAuthor,
) -> Result<Option<String>> {
    if base.status() != Some(DRAFT_STATUS) {
        return Ok(Some(format!(
            "EIP {eip} is in state {}, not Draft",
            base.display_field(STATUS_KEY)
        )));
    }

    if base.eip() != Some(eip) {
        return Ok(Some(format!(
            "EIP header in {path} does not match: {}",
            base.display_field(EIP_KEY)
        )));
    }

    let authors = base
        .author()
        .ok_or_else(|| Error::Document(format!("{path} has no author header")))?;
    if !is_listed_author(authors, author) {
        return Ok(Some(format!(
            "User {} is not an author of EIP {eip}",
            author.login
        )));
    }

    Ok(None)
}

/// Rules applied to the document as proposed by the PR head
pub fn check_head_revision(eip: u64, path: &str, head: &DocumentRevision) -> Option<String> {
    if head.eip() != Some(eip) {
        return Some(format!(
            "EIP header in modified file {path} does not match: {}",
            head.display_field(EIP_KEY)
        ));
    }

    if head.status() != Some(DRAFT_STATUS) {
        return Some(format!(
            "Trying to change EIP {eip} state from Draft to {}",
            head.display_field(STATUS_KEY)
        ));
    }

    None
}

/// Evaluate one changed file of `pr`
///
/// Never fails: fetch and parse errors become an `Error checking file`
/// rejection that does not count the file's EIP.
pub async fn evaluate_file(
    platform: &dyn PlatformService,
    pr: &PullRequest,
    file: &ChangedFile,
) -> EvaluationResult {
    let Some(eip) = parse_eip_path(&file.path) else {
        debug!(path = %file.path, "not an EIP, ignoring");
        return EvaluationResult::out_of_scope(&file.path);
    };

    if file.status == FileStatus::Added {
        return EvaluationResult::rejected(
            &file.path,
            None,
            format!("Contains new file {}", file.path),
        );
    }

    match check_revisions(platform, pr, &file.path, eip).await {
        Ok(result) => result,
        Err(e) => {
            warn!(path = %file.path, pr = pr.number, error = %e, "error checking file");
            EvaluationResult::rejected(
                &file.path,
                None,
                format!("Error checking file {}", file.path),
            )
        }
    }
}

async fn check_revisions(
    platform: &dyn PlatformService,
    pr: &PullRequest,
    path: &str,
    eip: u64,
) -> Result<EvaluationResult> {
    let base = fetch_revision(platform, &pr.base, path).await?;
    if let Some(reason) = check_base_revision(eip, path, &base, &pr.author)? {
        return Ok(EvaluationResult::rejected(path, Some(eip), reason));
    }

    let head = fetch_revision(platform, &pr.head, path).await?;
    if let Some(reason) = check_head_revision(eip, path, &head) {
        return Ok(EvaluationResult::rejected(path, Some(eip), reason));
    }

    Ok(EvaluationResult::accepted(path, eip))
}

async fn fetch_revision(
    platform: &dyn PlatformService,
    side: &RevisionRef,
    path: &str,
) -> Result<DocumentRevision> {
    debug!(path, repo = %side.repo, sha = %side.sha, "fetching revision");
    let encoded = platform.get_file_content(&side.repo, path, &side.sha).await?;
    DocumentRevision::from_base64(&encoded)
}
