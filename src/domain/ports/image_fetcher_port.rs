//! Port definition for image fetching.

use bytes::Bytes;

use crate::domain::entities::ImageRequest;
use crate::domain::errors::ImageError;

/// Result type for image fetches.
pub type ImageResult<T> = std::result::Result<T, ImageError>;

/// Port for fetching image bytes.
/// Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the encoded image for `request`.
    async fn fetch(&self, request: &ImageRequest) -> ImageResult<Bytes>;
}
