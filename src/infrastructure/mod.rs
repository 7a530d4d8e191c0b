//! Infrastructure layer with adapters for configuration and images.

/// Application configuration.
pub mod config;
/// Image handling (CDN rewriting, fetching).
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigSource, ConfigStore, LogLevel};
pub use image::{HttpImageFetcher, ImageCdnConfig, ImageLoaderConfig, StreamImageCdn};
