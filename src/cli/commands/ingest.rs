//! The ingest command: email message in, org entry out.

use std::fs::OpenOptions;
use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::cli::args::IngestArgs;
use crate::config::Config;
use crate::core::resolve;
use crate::error::Mail2OrgError;
use crate::mail::Message;
use crate::output::{render_entry, render_error_entry};

/// Read a message, build its org entry, and write or return it.
///
/// Returns the entry text when writing to stdout, an empty string when
/// the entry went to a file. An empty input produces no entry at all.
///
/// # Errors
///
/// Returns an error when the input or the org file cannot be accessed.
/// Messages that fail to parse or resolve do not error; they become an
/// "Error parsing message" entry instead, so no mail is dropped.
pub fn ingest(args: &IngestArgs, config: &Config) -> Result<String, Mail2OrgError> {
    let raw = match &args.input {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    if raw.is_empty() {
        debug!("empty input, nothing to do");
        return Ok(String::new());
    }

    let active = config.general.active_timestamps && !args.inactive;
    let entry = match build_entry(&raw, config, active) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "falling back to error entry");
            render_error_entry(&String::from_utf8_lossy(&raw))
        }
    };

    match &args.org_file {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(!args.no_append)
                .write(true)
                .truncate(args.no_append)
                .open(path)?;
            file.write_all(entry.as_bytes())?;
            Ok(String::new())
        }
        None => Ok(entry),
    }
}

fn build_entry(raw: &[u8], config: &Config, active: bool) -> Result<String, Mail2OrgError> {
    let message = Message::parse(raw)?;
    let token = message.token();
    let reference = message.reference(config.general.time_separator);
    let resolved = resolve(reference, &token)?;
    debug!(token = %token, reference = %reference, ?resolved, "resolved token");

    Ok(render_entry(&message, resolved.as_ref(), config, active))
}
