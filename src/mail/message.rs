//! Parsed email messages.

use chrono::{Local, NaiveDateTime, TimeZone};
use mailparse::{addrparse, dateparse, MailAddr, MailHeaderMap, ParsedMail};
use tracing::debug;

use crate::config::BodyConfig;
use crate::core::Reference;
use crate::error::Mail2OrgError;

/// Lines from this delimiter on are an email signature.
const SIGNATURE_DELIMITER: &str = "-- ";

/// The pieces of an email message that end up in an org entry.
#[derive(Debug, Clone)]
pub struct Message {
    /// Decoded `Subject:`, falling back to "No Subject".
    pub subject: String,
    /// Decoded `From:` header.
    pub from: String,
    /// Decoded `To:` header.
    pub to: String,
    /// Raw `Date:` header, as written by the sender.
    pub date_header: Option<String>,
    /// Parsed message date as naive local time, when the header parses.
    pub date: Option<NaiveDateTime>,
    /// Plain-text body (first `text/plain` part(s), charset-decoded).
    pub body: String,
}

impl Message {
    /// Parse a raw RFC 822 message.
    ///
    /// # Errors
    ///
    /// Returns [`Mail2OrgError::Mail`] when the message structure cannot
    /// be parsed at all. Missing headers are not errors.
    pub fn parse(raw: &[u8]) -> Result<Self, Mail2OrgError> {
        let mail = mailparse::parse_mail(raw)?;

        let subject = mail
            .headers
            .get_first_value("Subject")
            .unwrap_or_else(|| "No Subject".to_string());
        debug!(subject = %subject, "decoded subject header");

        let from = mail.headers.get_first_value("From").unwrap_or_default();
        debug!(from = %from, "decoded from header");

        let to = mail.headers.get_first_value("To").unwrap_or_default();
        debug!(to = %to, "decoded to header");

        let date_header = mail.headers.get_first_value("Date");
        let date = date_header
            .as_deref()
            .and_then(|raw| dateparse(raw).ok())
            .and_then(|epoch| Local.timestamp_opt(epoch, 0).single())
            .map(|local| local.naive_local());
        debug!(?date, "parsed message date");

        let body = text_plain_body(&mail)?;
        debug!(body_len = body.len(), "extracted plain-text body");

        Ok(Self {
            subject,
            from,
            to,
            date_header,
            date,
            body,
        })
    }

    /// The scheduling token: the local-part of the first `To:` address.
    #[must_use]
    pub fn token(&self) -> String {
        let address = addrparse(&self.to)
            .ok()
            .and_then(|list| {
                list.iter().find_map(|addr| match addr {
                    MailAddr::Single(info) => Some(info.addr.clone()),
                    MailAddr::Group(group) => {
                        group.addrs.first().map(|info| info.addr.clone())
                    }
                })
            })
            .unwrap_or_else(|| self.to.clone());

        address
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// The reference point the token is resolved against: the message
    /// date when present, otherwise the current time or date depending
    /// on whether the token carries a time fragment.
    #[must_use]
    pub fn reference(&self, time_separator: char) -> Reference {
        if let Some(dt) = self.date {
            return Reference::Date(dt.date());
        }
        if self.token().contains(time_separator) {
            Reference::DateTime(Local::now().naive_local())
        } else {
            Reference::Date(Local::now().date_naive())
        }
    }

    /// The body as it appears in the org entry: carriage returns dropped,
    /// truncated to the configured budget, signature stripped.
    #[must_use]
    pub fn prepared_body(&self, config: &BodyConfig) -> String {
        let body = self.body.replace('\r', "");
        let body = truncate_chars(&body, config.max_chars);
        if config.strip_signature {
            strip_signature(&body)
        } else {
            body
        }
    }
}

/// Collect the plain-text body: the `text/plain` subparts of a multipart
/// message joined with newlines, or the body of a single-part
/// `text/plain` message, otherwise empty.
fn text_plain_body(mail: &ParsedMail<'_>) -> Result<String, Mail2OrgError> {
    if mail.subparts.is_empty() {
        if mail.ctype.mimetype == "text/plain" {
            return Ok(mail.get_body()?.trim().to_string());
        }
        return Ok(String::new());
    }

    let mut parts = Vec::new();
    collect_text_plain(mail, &mut parts)?;
    Ok(parts.join("\n").trim().to_string())
}

fn collect_text_plain(mail: &ParsedMail<'_>, parts: &mut Vec<String>) -> Result<(), Mail2OrgError> {
    for part in &mail.subparts {
        if part.subparts.is_empty() {
            if part.ctype.mimetype == "text/plain" {
                parts.push(part.get_body()?);
            }
        } else {
            collect_text_plain(part, parts)?;
        }
    }
    Ok(())
}

/// Drop everything from the signature delimiter line on.
fn strip_signature(body: &str) -> String {
    body.lines()
        .take_while(|line| *line != SIGNATURE_DELIMITER)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to at most `max_chars` characters without splitting one.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const SIMPLE: &[u8] = b"From: Alice <alice@example.com>\r\n\
To: mon@todo.example.com\r\n\
Subject: Water the plants\r\n\
Date: Thu, 17 Jul 2014 12:30:59 +0000\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Don't forget the balcony.\r\n";

    #[test]
    fn test_parse_simple_message() {
        let message = Message::parse(SIMPLE).unwrap();
        assert_eq!(message.subject, "Water the plants");
        assert_eq!(message.from, "Alice <alice@example.com>");
        assert_eq!(message.to, "mon@todo.example.com");
        assert_eq!(message.body, "Don't forget the balcony.");
        assert!(message.date.is_some());
    }

    #[test]
    fn test_token_from_local_part() {
        let message = Message::parse(SIMPLE).unwrap();
        assert_eq!(message.token(), "mon");
    }

    #[test]
    fn test_token_with_display_name() {
        let raw = b"To: Todo Inbox <tom#1000@todo.example.com>\r\n\r\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.token(), "tom#1000");
    }

    #[test]
    fn test_missing_subject_falls_back() {
        let raw = b"To: tom@todo.example.com\r\n\r\nbody\r\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.subject, "No Subject");
    }

    #[test]
    fn test_encoded_subject_is_decoded() {
        let raw = b"To: tom@todo.example.com\r\n\
Subject: =?utf-8?q?Caf=C3=A9_run?=\r\n\r\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.subject, "Caf\u{e9} run");
    }

    #[test]
    fn test_reference_uses_message_date() {
        let message = Message::parse(SIMPLE).unwrap();
        let reference = message.reference('#');
        // collapsed to the message's calendar date
        assert_eq!(
            reference.date(),
            message.date.map(|dt| dt.date()).unwrap()
        );
        assert_eq!(reference.date().month(), 7);
    }

    #[test]
    fn test_multipart_picks_text_plain() {
        let raw = b"To: fri@todo.example.com\r\n\
Content-Type: multipart/alternative; boundary=\"sep\"\r\n\
\r\n\
--sep\r\n\
Content-Type: text/html\r\n\
\r\n\
<p>rich</p>\r\n\
--sep\r\n\
Content-Type: text/plain\r\n\
\r\n\
plain text\r\n\
--sep--\r\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.body, "plain text");
    }

    #[test]
    fn test_non_text_single_part_is_empty() {
        let raw = b"To: fri@todo.example.com\r\n\
Content-Type: text/html\r\n\
\r\n\
<p>rich</p>\r\n";
        let message = Message::parse(raw).unwrap();
        assert_eq!(message.body, "");
    }

    #[test]
    fn test_strip_signature() {
        let body = "see you\nthere\n-- \nAlice\nSent from a phone";
        assert_eq!(strip_signature(body), "see you\nthere");
    }

    #[test]
    fn test_strip_signature_requires_exact_delimiter() {
        // "--" without the trailing space is not a signature delimiter
        let body = "above\n--\nbelow";
        assert_eq!(strip_signature(body), body);
    }

    #[test]
    fn test_truncate_chars_is_char_safe() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("\u{e9}\u{e9}\u{e9}", 2), "\u{e9}\u{e9}");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_prepared_body() {
        let message = Message {
            subject: String::new(),
            from: String::new(),
            to: String::new(),
            date_header: None,
            date: None,
            body: "line\r\nmore\r\n-- \r\nsig".to_string(),
        };
        let config = BodyConfig::default();
        assert_eq!(message.prepared_body(&config), "line\nmore");
    }
}
