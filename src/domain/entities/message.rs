use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::User;

/// Opaque identifier for a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Creates a message id from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of attachment carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AttachmentKind {
    Image,
    Video,
    Giphy,
    File,
    Audio,
    Link,
    VoiceRecording,
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Giphy => write!(f, "giphy"),
            Self::File => write!(f, "file"),
            Self::Audio => write!(f, "audio"),
            Self::Link => write!(f, "link"),
            Self::VoiceRecording => write!(f, "voice_recording"),
        }
    }
}

/// A chat message.
///
/// Quoted messages are shared behind an [`Arc`] so that a reply and the
/// screen caches can hold the same quoted message without copying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    author: User,
    #[serde(default)]
    text: String,
    #[serde(default)]
    quoted_message: Option<Arc<Message>>,
    #[serde(default)]
    attachment_counts: HashMap<AttachmentKind, u32>,
}

#[allow(missing_docs)]
impl Message {
    #[must_use]
    pub fn new(id: impl Into<MessageId>, author: User) -> Self {
        Self {
            id: id.into(),
            author,
            text: String::new(),
            quoted_message: None,
            attachment_counts: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_quoted_message(mut self, quoted: impl Into<Arc<Self>>) -> Self {
        self.quoted_message = Some(quoted.into());
        self
    }

    /// Adds one attachment of the given kind.
    #[must_use]
    pub fn with_attachment(mut self, kind: AttachmentKind) -> Self {
        *self.attachment_counts.entry(kind).or_insert(0) += 1;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    #[must_use]
    pub const fn author(&self) -> &User {
        &self.author
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn quoted_message(&self) -> Option<&Arc<Self>> {
        self.quoted_message.as_ref()
    }

    #[must_use]
    pub const fn attachment_counts(&self) -> &HashMap<AttachmentKind, u32> {
        &self.attachment_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_attachment_counts_per_kind() {
        let message = Message::new("m1", User::new("u1"))
            .with_attachment(AttachmentKind::Image)
            .with_attachment(AttachmentKind::Image)
            .with_attachment(AttachmentKind::File);

        assert_eq!(message.attachment_counts().get(&AttachmentKind::Image), Some(&2));
        assert_eq!(message.attachment_counts().get(&AttachmentKind::File), Some(&1));
        assert!(!message.attachment_counts().contains_key(&AttachmentKind::Video));
    }

    #[test]
    fn test_deserialize_reply_with_attachments() {
        let json = r#"{
            "id": "m3",
            "author": {"id": "u1", "name": "Leia"},
            "text": "agreed",
            "quoted_message": {"id": "m4", "author": {"id": "u2"}, "text": "ship it?"},
            "attachment_counts": {"voice_recording": 1}
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();

        assert_eq!(message.id().as_str(), "m3");
        assert_eq!(message.author().name(), Some("Leia"));
        let quoted = message.quoted_message().unwrap();
        assert_eq!(quoted.id().as_str(), "m4");
        assert_eq!(quoted.text(), "ship it?");
        assert_eq!(
            message.attachment_counts().get(&AttachmentKind::VoiceRecording),
            Some(&1)
        );
    }

    #[test]
    fn test_deserialize_minimal_message() {
        let message: Message =
            serde_json::from_str(r#"{"id": "m1", "author": {"id": "u1"}}"#).unwrap();

        assert!(message.text().is_empty());
        assert!(message.quoted_message().is_none());
        assert!(message.attachment_counts().is_empty());
    }
}
