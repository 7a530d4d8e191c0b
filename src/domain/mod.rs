//! Domain layer with chat entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Message, MessageId, User, UserDisplayInfo, UserId};
pub use errors::ImageError;
pub use ports::{ImageCdn, ImageFetcherPort};
