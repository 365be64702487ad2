//! Shared fixtures for tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{
    ContentCall, CreateCommentCall, MergePrCall, MockPlatformFactory, MockPlatformService,
};

use chrono::{DateTime, TimeZone, Utc};
use eip_automerge::types::{
    ChangedFile, FileStatus, MergeableState, PlatformConfig, PrAuthor, PullRequest, RepoName,
    RevisionRef,
};

pub const BASE_SHA: &str = "base0000";
pub const HEAD_SHA: &str = "head1111";

/// Repository used by most tests
pub fn eips_repo() -> RepoName {
    RepoName::new("ethereum", "EIPs")
}

pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        repo: eips_repo(),
        host: None,
    }
}

/// An open, clean PR by `login` from a fork
pub fn make_pr(number: u64, login: &str) -> PullRequest {
    PullRequest {
        number,
        merged: false,
        mergeable_state: MergeableState::Clean,
        author: PrAuthor {
            login: login.to_string(),
            email: None,
        },
        base: RevisionRef {
            repo: eips_repo(),
            ref_name: "master".to_string(),
            sha: BASE_SHA.to_string(),
        },
        head: RevisionRef {
            repo: RepoName::new(login, "EIPs"),
            ref_name: "update".to_string(),
            sha: HEAD_SHA.to_string(),
        },
    }
}

/// Markdown text of an EIP with the given header values
pub fn eip_doc(eip: u64, status: &str, author: &str) -> String {
    format!(
        "---\neip: {eip}\ntitle: Example proposal\nauthor: {author}\nstatus: {status}\ntype: Standards Track\n---\n\n## Abstract\n\nSomething useful.\n"
    )
}

pub fn modified(path: &str) -> ChangedFile {
    ChangedFile::new(path, FileStatus::Modified)
}

pub fn added(path: &str) -> ChangedFile {
    ChangedFile::new(path, FileStatus::Added)
}

/// Timestamp `minutes` after a fixed epoch
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// Mock with PR `number` by `login` touching `EIPS/eip-<eip>.md`, with the
/// given base and head documents
pub fn mock_with_eip_change(
    number: u64,
    login: &str,
    eip: u64,
    base_doc: &str,
    head_doc: &str,
) -> MockPlatformService {
    let mock = MockPlatformService::with_config(github_config());
    let path = format!("EIPS/eip-{eip}.md");
    mock.set_pull_request(make_pr(number, login));
    mock.set_files(number, vec![modified(&path)]);
    mock.set_content(BASE_SHA, &path, base_doc);
    mock.set_content(HEAD_SHA, &path, head_doc);
    mock
}
