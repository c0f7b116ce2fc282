//! Output formatting for mail2org.
//!
//! Org-mode entry rendering plus pretty/JSON formatting for the
//! `resolve` command.

mod json;
mod org;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::{Reference, Resolved};
use crate::error::Mail2OrgError;

pub use json::format_resolution_json;
pub use org::{format_timestamp, render_entry, render_error_entry};
pub use pretty::format_resolution_pretty;

/// Format a token resolution based on output format.
///
/// # Errors
///
/// Returns `Mail2OrgError::Json` if JSON serialization fails.
pub fn format_resolution(
    token: &str,
    reference: Reference,
    resolved: Option<&Resolved>,
    format: OutputFormat,
) -> Result<String, Mail2OrgError> {
    match format {
        OutputFormat::Pretty => Ok(format_resolution_pretty(resolved)),
        OutputFormat::Json => format_resolution_json(token, reference, resolved),
    }
}
