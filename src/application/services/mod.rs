pub mod display_info_cache;

pub use display_info_cache::{CacheStats, DisplayInfoCache, QuotedLookup};
