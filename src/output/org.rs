//! Org-mode rendering.
//!
//! Turns a resolved date and a parsed message into an org entry using the
//! configured layout templates.

use crate::config::Config;
use crate::core::Resolved;
use crate::mail::Message;

/// How much of an unparsable message the error entry keeps.
const ERROR_ENTRY_CHARS: usize = 2000;

/// Render a resolved date as an org timestamp.
///
/// Active timestamps use angle brackets, inactive ones square brackets.
/// Weekday abbreviations are chrono's English ones; org expects exactly
/// these regardless of the user's locale.
///
/// ```
/// use chrono::NaiveDate;
/// use mail2org::core::Resolved;
/// use mail2org::output::format_timestamp;
///
/// let date = NaiveDate::from_ymd_opt(2014, 7, 17).unwrap();
/// assert_eq!(
///     format_timestamp(&Resolved::date_only(date), false),
///     "[2014-07-17 Thu]"
/// );
/// ```
#[must_use]
pub fn format_timestamp(resolved: &Resolved, active: bool) -> String {
    let stamp = resolved.time.map_or_else(
        || resolved.date.format("%Y-%m-%d %a").to_string(),
        |time| {
            format!(
                "{} {}",
                resolved.date.format("%Y-%m-%d %a"),
                time.format("%H:%M")
            )
        },
    );

    if active {
        format!("<{stamp}>")
    } else {
        format!("[{stamp}]")
    }
}

/// Render the org entry for a message.
///
/// `resolved` being absent (the token matched nothing) omits the
/// scheduling line; the message is still captured.
#[must_use]
pub fn render_entry(
    message: &Message,
    resolved: Option<&Resolved>,
    config: &Config,
    active: bool,
) -> String {
    let timestamp = resolved.map_or_else(String::new, |r| {
        config
            .layout
            .timestamp
            .replace("{timestamp}", &format_timestamp(r, active))
    });

    let content = config
        .layout
        .content
        .replace("{from}", &message.from)
        .replace("{to}", &message.to)
        .replace("{date}", message.date_header.as_deref().unwrap_or_default())
        .replace("{subject}", &message.subject)
        .replace("{body}", &message.prepared_body(&config.body));

    config
        .layout
        .entry
        .replace("{subject}", &message.subject)
        .replace("{timestamp}", &timestamp)
        .replace("{content}", &content)
}

/// Fallback entry for a message that could not be processed, so no mail
/// is ever dropped silently.
#[must_use]
pub fn render_error_entry(raw: &str) -> String {
    let excerpt: String = raw.chars().take(ERROR_ENTRY_CHARS).collect();
    format!("* Error parsing message:\n\n{excerpt}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn resolved_datetime() -> Resolved {
        Resolved::with_time(
            NaiveDate::from_ymd_opt(2014, 7, 17).unwrap(),
            NaiveTime::from_hms_opt(12, 30, 59).unwrap(),
        )
    }

    fn sample_message() -> Message {
        Message {
            subject: "Water the plants".to_string(),
            from: "Alice <alice@example.com>".to_string(),
            to: "mon@todo.example.com".to_string(),
            date_header: Some("Thu, 17 Jul 2014 12:30:59 +0000".to_string()),
            date: None,
            body: "Don't forget the balcony.".to_string(),
        }
    }

    #[test]
    fn test_timestamp_active_datetime() {
        assert_eq!(
            format_timestamp(&resolved_datetime(), true),
            "<2014-07-17 Thu 12:30>"
        );
    }

    #[test]
    fn test_timestamp_inactive_datetime() {
        assert_eq!(
            format_timestamp(&resolved_datetime(), false),
            "[2014-07-17 Thu 12:30]"
        );
    }

    #[test]
    fn test_timestamp_inactive_date() {
        let date = NaiveDate::from_ymd_opt(2014, 7, 17).unwrap();
        assert_eq!(
            format_timestamp(&Resolved::date_only(date), false),
            "[2014-07-17 Thu]"
        );
    }

    #[test]
    fn test_render_entry_with_schedule() {
        let entry = render_entry(
            &sample_message(),
            Some(&resolved_datetime()),
            &Config::default(),
            true,
        );

        assert!(entry.starts_with("* Water the plants\nSCHEDULED: <2014-07-17 Thu 12:30>\n"));
        assert!(entry.contains("From: Alice <alice@example.com>"));
        assert!(entry.contains("Date: Thu, 17 Jul 2014 12:30:59 +0000"));
        assert!(entry.contains("Don't forget the balcony."));
    }

    #[test]
    fn test_render_entry_without_schedule() {
        let entry = render_entry(&sample_message(), None, &Config::default(), true);

        assert!(entry.starts_with("* Water the plants\n\n"));
        assert!(!entry.contains("SCHEDULED:"));
    }

    #[test]
    fn test_render_error_entry() {
        let entry = render_error_entry("garbled");
        assert!(entry.starts_with("* Error parsing message:"));
        assert!(entry.contains("garbled"));
    }

    #[test]
    fn test_render_error_entry_truncates() {
        let long = "x".repeat(5000);
        let entry = render_error_entry(&long);
        assert!(entry.chars().count() < 2100);
    }
}
