//! Image request entities.

use crate::domain::ports::ImageCdn;

/// A resolved request for loading an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    url: String,
    caching_key: String,
}

impl ImageRequest {
    /// Creates a request that uses the URL itself as caching key.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            caching_key: url.clone(),
            url,
        }
    }

    /// Resolves a request through the CDN. No URL means nothing to load.
    #[must_use]
    pub fn resolve(cdn: &dyn ImageCdn, url: Option<&str>) -> Option<Self> {
        url.map(|url| cdn.request_for_image(url))
    }

    /// Replaces the caching key.
    #[must_use]
    pub fn with_caching_key(mut self, key: impl Into<String>) -> Self {
        self.caching_key = key.into();
        self
    }

    /// URL to load.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Key identifying the image independent of volatile URL parts.
    #[must_use]
    pub fn caching_key(&self) -> &str {
        &self.caching_key
    }
}
