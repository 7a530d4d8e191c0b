//! Screen-scoped memo of per-message display data.
//!
//! A [`DisplayInfoCache`] lives as long as one channel screen is active. It
//! remembers, by message id, who authored a message, whether it quotes
//! another message, and whether it carries attachments, so list rendering
//! does not walk the message model again on every frame. Nothing is ever
//! evicted; the owner calls [`DisplayInfoCache::clear_cache`] when the screen
//! goes away or the id namespace changes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::{Message, MessageId, UserDisplayInfo, UserId};

/// What the cache knows about a message's quoted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotedLookup {
    /// The message has not been checked yet.
    Unchecked,
    /// The message was checked and quotes nothing.
    Absent,
    /// The message quotes the message with this id.
    Present(MessageId),
}

/// Per-message display data memoized for one screen.
#[derive(Debug, Default)]
pub struct DisplayInfoCache {
    message_author_mapping: HashMap<MessageId, UserId>,
    message_authors: HashMap<UserId, UserDisplayInfo>,
    message_attachments: HashMap<MessageId, bool>,
    checked_message_ids: HashSet<MessageId>,
    quoted_message_mapping: HashMap<MessageId, Arc<Message>>,
}

impl DisplayInfoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the message author.
    pub fn author_id(&mut self, message: &Message) -> UserId {
        self.display_info(message).id().clone()
    }

    /// Returns the author's display name, which falls back to the user id.
    pub fn author_name(&mut self, message: &Message) -> String {
        self.display_info(message).name().to_string()
    }

    /// Returns the author's avatar URL. A missing URL is cached like any other.
    pub fn author_image_url(&mut self, message: &Message) -> Option<String> {
        self.display_info(message).image_url().map(String::from)
    }

    /// Returns the message quoted by `message`, remembering both outcomes.
    pub fn quoted_message(&mut self, message: &Message) -> Option<Arc<Message>> {
        let id = message.id();
        if self.checked_message_ids.contains(id) {
            return None;
        }

        if let Some(quoted) = self.quoted_message_mapping.get(id) {
            return Some(Arc::clone(quoted));
        }

        let quoted = message.quoted_message().cloned();
        match &quoted {
            Some(quoted) => {
                self.quoted_message_mapping
                    .insert(id.clone(), Arc::clone(quoted));
            }
            None => {
                self.checked_message_ids.insert(id.clone());
            }
        }
        trace!(message_id = %id, found = quoted.is_some(), "Quoted message resolved");

        quoted
    }

    /// Returns whether the message carries any attachment.
    pub fn has_attachments(&mut self, message: &Message) -> bool {
        if let Some(&has_attachments) = self.message_attachments.get(message.id()) {
            return has_attachments;
        }
        self.check_attachments(message)
    }

    /// Reports the memoized quoted-message state for `message_id`.
    #[must_use]
    pub fn quoted_lookup(&self, message_id: &MessageId) -> QuotedLookup {
        if self.checked_message_ids.contains(message_id) {
            QuotedLookup::Absent
        } else if let Some(quoted) = self.quoted_message_mapping.get(message_id) {
            QuotedLookup::Present(quoted.id().clone())
        } else {
            QuotedLookup::Unchecked
        }
    }

    /// Returns the size of every table.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            author_mappings: self.message_author_mapping.len(),
            authors: self.message_authors.len(),
            attachment_checks: self.message_attachments.len(),
            messages_without_quote: self.checked_message_ids.len(),
            quoted_messages: self.quoted_message_mapping.len(),
        }
    }

    /// Drops every memoized value.
    pub fn clear_cache(&mut self) {
        debug!("Clearing cached message data");
        *self = Self::default();
    }

    fn display_info(&mut self, message: &Message) -> UserDisplayInfo {
        if let Some(info) = self.cached_display_info(message.id()) {
            trace!(message_id = %message.id(), "Display info cache hit");
            return info.clone();
        }

        trace!(message_id = %message.id(), "Display info cache miss");
        self.save_display_info(message)
    }

    fn cached_display_info(&self, message_id: &MessageId) -> Option<&UserDisplayInfo> {
        self.message_author_mapping
            .get(message_id)
            .and_then(|user_id| self.message_authors.get(user_id))
    }

    fn save_display_info(&mut self, message: &Message) -> UserDisplayInfo {
        let info = UserDisplayInfo::from_user(message.author());
        self.message_author_mapping
            .insert(message.id().clone(), info.id().clone());
        self.message_authors.insert(info.id().clone(), info.clone());
        info
    }

    fn check_attachments(&mut self, message: &Message) -> bool {
        let has_attachments = !message.attachment_counts().is_empty();
        self.message_attachments
            .insert(message.id().clone(), has_attachments);
        has_attachments
    }
}

/// Table sizes of a [`DisplayInfoCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Messages with a remembered author.
    pub author_mappings: usize,
    /// Distinct authors with display info.
    pub authors: usize,
    /// Messages with a remembered attachment check.
    pub attachment_checks: usize,
    /// Messages known to quote nothing.
    pub messages_without_quote: usize,
    /// Messages with a remembered quoted message.
    pub quoted_messages: usize,
}

impl CacheStats {
    /// Sum of all table sizes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.author_mappings
            + self.authors
            + self.attachment_checks
            + self.messages_without_quote
            + self.quoted_messages
    }
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Display cache: {} authors for {} messages, {} quotes ({} without), {} attachment checks",
            self.authors,
            self.author_mappings,
            self.quoted_messages,
            self.messages_without_quote,
            self.attachment_checks
        )
    }
}
