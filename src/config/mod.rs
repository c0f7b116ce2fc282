//! Configuration management for mail2org.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{BodyConfig, Config, GeneralConfig, LayoutConfig};
