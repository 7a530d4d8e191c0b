//! chatcache - screen-scoped display caches for chat message lists.
//!
//! This crate provides the per-screen memo of author identity, quoted
//! messages and attachment presence used while rendering a channel, along
//! with the CDN and image-fetching collaborators a channel screen needs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing display services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for configuration and images.
pub mod infrastructure;
/// Presentation layer containing screen state and lifecycle events.
pub mod presentation;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "chatcache";
