//! CLI commands

mod check;
mod context;
mod serve;
mod style;

pub use check::run_check;
pub use serve::run_serve;
