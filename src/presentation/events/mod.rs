//! Screen lifecycle events.

use crate::domain::entities::ChannelId;

/// Lifecycle signals delivered to a channel screen by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The screen became visible.
    Appeared,
    /// The screen was dismissed.
    Dismissed,
    /// The system asked to release memory.
    MemoryWarning,
    /// The screen now shows another channel.
    ChannelChanged(ChannelId),
}

impl std::fmt::Display for ScreenEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Appeared => write!(f, "appeared"),
            Self::Dismissed => write!(f, "dismissed"),
            Self::MemoryWarning => write!(f, "memory warning"),
            Self::ChannelChanged(id) => write!(f, "channel changed to {id}"),
        }
    }
}
