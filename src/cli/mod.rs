//! Command-line interface for mail2org.

pub mod args;
pub mod commands;
