//! Core date resolution logic.
//!
//! This module contains the relative-date token resolver and the calendar
//! arithmetic it relies on.

mod calendar;
mod resolve;

pub use resolve::{resolve, Reference, Resolved};
