//! Image fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching an image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("invalid image url: {url}")]
    InvalidUrl { url: String },

    #[error("network error while fetching image: {message}")]
    Network { message: String },

    #[error("image request failed with status {status}")]
    Status { status: u16 },
}

impl ImageError {
    /// Creates invalid url error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::InvalidUrl { .. } => false,
        }
    }
}
