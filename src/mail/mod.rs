//! Email message ingestion.
//!
//! Parses raw message bytes, decodes the headers the org entry needs, and
//! derives the scheduling token from the recipient address.

mod message;

pub use message::Message;
