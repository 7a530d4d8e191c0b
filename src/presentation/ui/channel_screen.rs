use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::application::services::{CacheStats, DisplayInfoCache};
use crate::domain::entities::{ChannelId, ImageRequest, Message, MessageId, UserId};
use crate::domain::ports::{ImageCdn, ImageFetcherPort};
use crate::presentation::events::ScreenEvent;

/// Preview of the message a row replies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedPreview {
    /// Id of the quoted message.
    pub message_id: MessageId,
    /// Display name of the quoted message's author.
    pub author_name: String,
    /// Text of the quoted message.
    pub text: String,
}

/// Everything needed to draw one message row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    /// Id of the message.
    pub message_id: MessageId,
    /// Id of the author.
    pub author_id: UserId,
    /// Display name of the author.
    pub author_name: String,
    /// Avatar load request, if the author has an avatar.
    pub avatar: Option<ImageRequest>,
    /// Reply preview, if the message quotes another message.
    pub quoted: Option<QuotedPreview>,
    /// Whether the message carries attachments.
    pub has_attachments: bool,
}

/// State of one visible channel screen.
///
/// Owns the [`DisplayInfoCache`] for its current activation and clears it
/// whenever cached ids may no longer describe what is on screen.
pub struct ChannelScreen {
    channel_id: ChannelId,
    cache: DisplayInfoCache,
    cdn: Arc<dyn ImageCdn>,
    visible: bool,
}

impl std::fmt::Debug for ChannelScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelScreen")
            .field("channel_id", &self.channel_id)
            .field("cache", &self.cache.stats())
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl ChannelScreen {
    /// Creates a hidden screen for `channel_id` with an empty cache.
    #[must_use]
    pub fn new(channel_id: ChannelId, cdn: Arc<dyn ImageCdn>) -> Self {
        Self {
            channel_id,
            cache: DisplayInfoCache::new(),
            cdn,
            visible: false,
        }
    }

    /// Channel currently shown.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Whether the screen is on display.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Table sizes of the screen's display cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Applies a lifecycle event.
    pub fn handle_event(&mut self, event: ScreenEvent) {
        debug!(channel = %self.channel_id, %event, "Channel screen event");
        match event {
            ScreenEvent::Appeared => {
                self.visible = true;
            }
            ScreenEvent::Dismissed => {
                self.visible = false;
                self.cache.clear_cache();
            }
            ScreenEvent::MemoryWarning => {
                self.cache.clear_cache();
            }
            ScreenEvent::ChannelChanged(channel_id) => {
                if channel_id == self.channel_id {
                    return;
                }
                info!(from = %self.channel_id, to = %channel_id, "Switching channel");
                self.channel_id = channel_id;
                self.cache.clear_cache();
            }
        }
    }

    /// Builds the display row for `message`.
    pub fn row(&mut self, message: &Message) -> MessageRow {
        let author_id = self.cache.author_id(message);
        let author_name = self.cache.author_name(message);
        let avatar_url = self.cache.author_image_url(message);
        let avatar = ImageRequest::resolve(self.cdn.as_ref(), avatar_url.as_deref());

        let quoted = self.cache.quoted_message(message).map(|quoted| QuotedPreview {
            message_id: quoted.id().clone(),
            author_name: self.cache.author_name(&quoted),
            text: quoted.text().to_string(),
        });

        MessageRow {
            message_id: message.id().clone(),
            author_id,
            author_name,
            avatar,
            quoted,
            has_attachments: self.cache.has_attachments(message),
        }
    }

    /// Builds display rows for `messages` in order.
    pub fn rows(&mut self, messages: &[Message]) -> Vec<MessageRow> {
        messages.iter().map(|message| self.row(message)).collect()
    }

    /// Fetches each distinct author avatar once. Recoverable failures are
    /// retried once, others are logged and skipped; returns the number of
    /// avatars fetched.
    pub async fn prefetch_avatars(
        &mut self,
        messages: &[Message],
        fetcher: &dyn ImageFetcherPort,
    ) -> usize {
        let mut seen = HashSet::new();
        let mut requests = Vec::new();
        for message in messages {
            let Some(url) = self.cache.author_image_url(message) else {
                continue;
            };
            let request = self.cdn.request_for_image(&url);
            if seen.insert(request.caching_key().to_string()) {
                requests.push(request);
            }
        }

        let mut fetched = 0;
        for request in &requests {
            let mut result = fetcher.fetch(request).await;
            if let Err(e) = &result
                && e.is_recoverable()
            {
                debug!(url = request.url(), error = %e, "Retrying avatar prefetch");
                result = fetcher.fetch(request).await;
            }

            match result {
                Ok(bytes) => {
                    trace!(url = request.url(), size = bytes.len(), "Avatar prefetched");
                    fetched += 1;
                }
                Err(e) => {
                    warn!(url = request.url(), error = %e, "Avatar prefetch failed");
                }
            }
        }

        debug!(
            channel = %self.channel_id,
            requested = requests.len(),
            fetched,
            "Avatar prefetch finished"
        );
        fetched
    }
}
