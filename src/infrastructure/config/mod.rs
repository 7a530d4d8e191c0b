//! Application configuration.

pub mod app_config;
pub mod args;
pub mod store;

pub use app_config::{AppConfig, LogLevel};
pub use args::CliArgs;
pub use store::{ConfigError, ConfigSource, ConfigStore};
