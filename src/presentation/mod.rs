//! Presentation layer with screen state and lifecycle events.

/// Lifecycle events.
pub mod events;
/// Screen state.
pub mod ui;

pub use events::ScreenEvent;
pub use ui::{ChannelScreen, MessageRow, QuotedPreview};
