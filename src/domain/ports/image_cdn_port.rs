//! Port definition for CDN request rewriting.

use crate::domain::entities::ImageRequest;

/// Rewrites image URLs into load requests for a particular CDN.
pub trait ImageCdn: Send + Sync {
    /// Builds the request used to load the image at `url`.
    fn request_for_image(&self, url: &str) -> ImageRequest;

    /// Returns a key identifying the image independent of volatile URL parts.
    fn caching_key(&self, url: &str) -> String;
}
