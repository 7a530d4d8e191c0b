//! Image CDN rewriting and fetching.

mod cdn;
mod loader;

pub use cdn::{DEFAULT_HEIGHT, DEFAULT_WIDTH, ImageCdnConfig, StreamImageCdn};
pub use loader::{DEFAULT_MEMORY_CACHE_SIZE, HttpImageFetcher, ImageLoaderConfig};
