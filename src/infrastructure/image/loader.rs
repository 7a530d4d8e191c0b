//! HTTP image fetcher with an in-memory LRU.

use std::num::NonZeroUsize;
use std::time::Duration;

use bytes::Bytes;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::ImageRequest;
use crate::domain::errors::ImageError;
use crate::domain::ports::{ImageFetcherPort, ImageResult};

/// Default maximum number of images kept in memory.
pub const DEFAULT_MEMORY_CACHE_SIZE: usize = 100;

/// Configuration for the image fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLoaderConfig {
    /// Maximum images in memory cache.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,
    /// Request timeout in seconds. Zero disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_memory_cache_size() -> usize {
    DEFAULT_MEMORY_CACHE_SIZE
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: DEFAULT_MEMORY_CACHE_SIZE,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ImageLoaderConfig {
    /// Returns the per-request timeout, or `None` when disabled.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Fetches images over HTTP, keeping recent results in memory.
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
    memory_cache: Mutex<LruCache<String, Bytes>>,
    config: ImageLoaderConfig,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ImageLoaderConfig) -> ImageResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ImageError::network(format!("Failed to create HTTP client: {e}")))?;

        let capacity = NonZeroUsize::new(config.memory_cache_size).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            http_client,
            memory_cache: Mutex::new(LruCache::new(capacity)),
            config,
        })
    }

    /// Returns the number of images held in memory.
    pub async fn cached_len(&self) -> usize {
        self.memory_cache.lock().await.len()
    }

    /// Drops every image held in memory.
    pub async fn clear(&self) {
        self.memory_cache.lock().await.clear();
        debug!("Cleared image memory cache");
    }

    async fn download(&self, request: &ImageRequest) -> ImageResult<Bytes> {
        let url = request.url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ImageError::invalid_url(url));
        }

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| ImageError::network(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, request: &ImageRequest) -> ImageResult<Bytes> {
        let key = request.caching_key();
        if let Some(bytes) = self.memory_cache.lock().await.get(key) {
            trace!(key, "Image memory cache hit");
            return Ok(bytes.clone());
        }
        trace!(key, "Image memory cache miss");

        let bytes = self.download(request).await?;
        debug!(url = request.url(), size = bytes.len(), "Downloaded image");
        self.memory_cache
            .lock()
            .await
            .put(key.to_string(), bytes.clone());

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_falls_back_to_one() {
        let fetcher = HttpImageFetcher::new(ImageLoaderConfig {
            memory_cache_size: 0,
            ..ImageLoaderConfig::default()
        })
        .unwrap();

        assert_eq!(fetcher.memory_cache.blocking_lock().cap().get(), 1);
    }

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let fetcher = HttpImageFetcher::new(ImageLoaderConfig::default()).unwrap();
        let result = fetcher.fetch(&ImageRequest::new("file:///etc/passwd")).await;

        assert_eq!(result, Err(ImageError::invalid_url("file:///etc/passwd")));
        assert_eq!(fetcher.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_serves_cached_bytes_by_caching_key() {
        let fetcher = HttpImageFetcher::new(ImageLoaderConfig::default()).unwrap();
        fetcher
            .memory_cache
            .lock()
            .await
            .put("avatar-key".to_string(), Bytes::from_static(b"cached"));

        let request = ImageRequest::new("https://unreachable.invalid/a.png?sig=1")
            .with_caching_key("avatar-key");
        let bytes = fetcher.fetch(&request).await.unwrap();

        assert_eq!(bytes, Bytes::from_static(b"cached"));

        fetcher.clear().await;
        assert_eq!(fetcher.cached_len().await, 0);
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = ImageLoaderConfig {
            timeout_secs: 0,
            ..ImageLoaderConfig::default()
        };

        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            ImageLoaderConfig::default().request_timeout(),
            Some(Duration::from_secs(30))
        );
        assert!(HttpImageFetcher::new(config).is_ok());
    }

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: ImageLoaderConfig = toml::from_str("").unwrap();

        assert_eq!(config, ImageLoaderConfig::default());
    }
}
