//! Command implementations.

mod completions;
mod ingest;
mod resolve;

pub use completions::completions;
pub use ingest::ingest;
pub use resolve::resolve_token;
