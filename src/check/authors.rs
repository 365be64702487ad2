//! Author list matching
//!
//! EIP headers list authors as free text, e.g.
//! `Alice Smith (@alice), Bob <bob@example.com>`. Only the parts inside
//! `(...)` or `<...>` identify an account.

use crate::types::PrAuthor;
use regex::Regex;
use std::sync::LazyLock;

static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(<]([^>)]+)[>)]").expect("valid author regex"));

/// Extract every bracketed identity from an author list
pub fn author_identities(author_list: &str) -> Vec<&str> {
    AUTHOR_RE
        .captures_iter(author_list)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Whether `author` is named in `author_list`
///
/// An identity matches when it is `@` followed by the login, or when it is
/// exactly the author's email. Comparisons are case-sensitive.
pub fn is_listed_author(author_list: &str, author: &PrAuthor) -> bool {
    author_identities(author_list).into_iter().any(|identity| {
        identity
            .strip_prefix('@')
            .is_some_and(|handle| handle == author.login)
            || author.email.as_deref() == Some(identity)
    })
}
