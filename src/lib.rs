//! mail2org - turn specially-addressed emails into org-mode entries.
//!
//! The local-part of a message's `To:` address carries a short relative-date
//! token ("mon", "2m", "04-25", "tom#1000"). mail2org resolves the token
//! against the message date and appends an org-mode entry with a matching
//! `SCHEDULED:` timestamp to an org file.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mail;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::Mail2OrgError;
pub use self::core::{resolve, Reference, Resolved};
