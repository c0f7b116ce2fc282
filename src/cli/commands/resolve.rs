//! The resolve command: print what a token resolves to.

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::Config;
use crate::core::{resolve, Reference};
use crate::error::Mail2OrgError;
use crate::output::format_resolution;

/// Resolve a token against `--from` or the current date.
///
/// # Errors
///
/// Returns an error when `--from` is unparsable or the token captures
/// values outside the calendar.
pub fn resolve_token(
    args: &ResolveArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<String, Mail2OrgError> {
    let reference = match &args.from {
        Some(text) => parse_reference(text)?,
        None if args.token.contains(config.general.time_separator) => {
            Reference::DateTime(Local::now().naive_local())
        }
        None => Reference::Date(Local::now().date_naive()),
    };
    debug!(token = %args.token, reference = %reference, "resolving token");

    let resolved = resolve(reference, &args.token)?;
    format_resolution(&args.token, reference, resolved.as_ref(), format)
}

/// Parse a `--from` value as a date or date-time.
fn parse_reference(text: &str) -> Result<Reference, Mail2OrgError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(Reference::DateTime(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Reference::DateTime(dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Reference::Date(date));
    }
    Err(Mail2OrgError::Date(format!(
        "unrecognized reference date: {text:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(token: &str, from: Option<&str>) -> ResolveArgs {
        ResolveArgs {
            token: token.to_string(),
            from: from.map(String::from),
        }
    }

    #[test]
    fn test_resolve_with_reference_date() {
        colored::control::set_override(false);
        let output = resolve_token(
            &args("mon", Some("2014-07-17")),
            &Config::default(),
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(output, "2014-07-21");
    }

    #[test]
    fn test_resolve_with_reference_datetime() {
        colored::control::set_override(false);
        let output = resolve_token(
            &args("tom#1000", Some("2014-02-01 12:30:59")),
            &Config::default(),
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(output, "2014-02-02 10:00:00");
    }

    #[test]
    fn test_resolve_no_match_pretty() {
        colored::control::set_override(false);
        let output = resolve_token(
            &args("zzz", Some("2014-02-01")),
            &Config::default(),
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(output, "no match");
    }

    #[test]
    fn test_resolve_json() {
        let output = resolve_token(
            &args("1w", Some("2014-01-15")),
            &Config::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["resolved"]["date"], "2014-01-22");
    }

    #[test]
    fn test_bad_reference_errors() {
        let result = resolve_token(
            &args("mon", Some("yesterday")),
            &Config::default(),
            OutputFormat::Pretty,
        );
        assert!(matches!(result, Err(Mail2OrgError::Date(_))));
    }
}
