//! Domain entity definitions.

mod channel;
mod display_info;
mod image;
mod message;
mod user;

pub use channel::ChannelId;
pub use display_info::UserDisplayInfo;
pub use image::ImageRequest;
pub use message::{AttachmentKind, Message, MessageId};
pub use user::{User, UserId};
