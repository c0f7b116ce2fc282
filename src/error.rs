//! Crate-wide error type for mail2org.

use thiserror::Error;

/// Errors surfaced by mail2org operations.
#[derive(Debug, Error)]
pub enum Mail2OrgError {
    /// Configuration file could not be read, written, or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The email message could not be parsed.
    #[error("Mail parsing error: {0}")]
    Mail(String),

    /// A matched token produced values outside the calendar
    /// (day 32, month 13, hour 99, ...).
    #[error("Calendar error: {0}")]
    Date(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<mailparse::MailParseError> for Mail2OrgError {
    fn from(e: mailparse::MailParseError) -> Self {
        Self::Mail(e.to_string())
    }
}
