//! Application layer with display services.

/// Display services shared by screens.
pub mod services;

pub use services::{CacheStats, DisplayInfoCache, QuotedLookup};
