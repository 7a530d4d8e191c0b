//! Screen state.

mod channel_screen;

pub use channel_screen::{ChannelScreen, MessageRow, QuotedPreview};
