//! Human-readable output for token resolution.

use colored::Colorize;

use crate::core::Resolved;

/// Format a token resolution for the terminal.
#[must_use]
pub fn format_resolution_pretty(resolved: Option<&Resolved>) -> String {
    resolved.map_or_else(
        || "no match".yellow().to_string(),
        |r| r.to_string().green().bold().to_string(),
    )
}
