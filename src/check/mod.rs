//! Per-file rule evaluation
//!
//! Classifies each changed file of a PR and, for draft EIPs, validates the
//! base → head transition:
//! - `authors` - pure author list matching
//! - `file` - path filter, revision fetches, and the rule sequence

mod authors;
mod file;

pub use authors::{author_identities, is_listed_author};
pub use file::{check_base_revision, check_head_revision, evaluate_file, parse_eip_path};

/// Outcome of evaluating one changed file
///
/// A file is either out of scope (no EIPs, no reason) or in scope. An
/// in-scope file carries its EIP number unless it was rejected before the
/// number could be trusted (new files, fetch/parse failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Path of the evaluated file
    pub path: String,
    /// EIP numbers this file counts toward (zero or one)
    pub eips: Vec<u64>,
    /// Why the file blocks an automatic merge, if it does
    pub reason: Option<String>,
}

impl EvaluationResult {
    /// File the policy does not cover
    pub fn out_of_scope(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            eips: Vec::new(),
            reason: None,
        }
    }

    /// Draft EIP whose change passed every rule
    pub fn accepted(path: impl Into<String>, eip: u64) -> Self {
        Self {
            path: path.into(),
            eips: vec![eip],
            reason: None,
        }
    }

    /// File that blocks the merge
    pub fn rejected(path: impl Into<String>, eip: Option<u64>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            eips: eip.into_iter().collect(),
            reason: Some(reason.into()),
        }
    }

    /// Whether this file passed (or was ignored)
    pub const fn is_ok(&self) -> bool {
        self.reason.is_none()
    }
}
