//! Utility functions.
//!
//! Collection of helpers used by the command handlers.

pub mod parser;
pub mod target;

pub use parser::{format_duration, html_escape, parse_mute_duration, PERMANENT_MUTE};
pub use target::resolve_target;

/// Format a user for display: `@username`, or the first name.
pub fn format_username(username: Option<&str>, first_name: &str) -> String {
    match username {
        Some(u) => format!("@{}", u),
        None => first_name.to_string(),
    }
}
