//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips colors when stdout is not a
//! terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic styles used by command output
pub trait Stylize {
    /// De-emphasized text
    fn muted(&self) -> String;
    /// Headings and key values
    fn emphasis(&self) -> String;
    /// Identifiers like PR and EIP numbers
    fn accent(&self) -> String;
    /// Problems that did not stop the command
    fn warn(&self) -> String;
    /// Completed actions
    fn success(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }
}

/// Check mark for passed items
pub fn check() -> String {
    "✓".success()
}

/// Cross for rejected items
pub fn cross() -> String {
    "✗".warn()
}
