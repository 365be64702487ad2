//! eip-automerge: auto-merge pull requests that only touch draft EIPs
//!
//! A PR is merged when every EIP file it changes is an existing draft, stays
//! a draft, keeps its EIP header, and lists the PR author among its authors.
//! Otherwise the bot explains on the PR why it stepped back.

pub mod auth;
pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod merge;
pub mod platform;
pub mod server;
pub mod types;
