//! Message and room types produced by the extraction pipeline.
//!
//! This module provides [`Message`], one decoded chat entry, and
//! [`MessageRoom`], the aggregate for one exported conversation.
//!
//! # Overview
//!
//! A message carries:
//! - **Always**: `id`, `sent_at`, `sender_name`, `message_type`
//! - **Per type**: [`Content::Text`] for text messages, `media_path` and
//!   `media_thumbnail_path` for media
//! - **Optional**: `reply_to_id` (empty when the message is not a reply)
//!
//! # Examples
//!
//! ```
//! use tgroom::{Message, MessageType};
//! use chrono::{TimeZone, Utc};
//!
//! let sent = Utc.with_ymd_and_hms(2019, 12, 29, 7, 5, 30).unwrap();
//! let msg = Message::new("message42", sent, "Alice").with_text("Hello!");
//!
//! assert_eq!(msg.message_type, MessageType::Text);
//! assert_eq!(msg.text(), Some("Hello!"));
//! assert!(!msg.is_reply());
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of payload a message carries.
///
/// `Unknown` is used when the body has neither a text node nor a recognised
/// media marker (for example a poll, a location, or a contact card).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Unknown,
    Text,
    Photo,
    Sticker,
    Video,
    AnimatedGif,
    Audio,
    Voice,
}

impl MessageType {
    /// Returns `true` for types whose export includes a thumbnail image.
    pub fn has_thumbnail(&self) -> bool {
        matches!(
            self,
            MessageType::Photo | MessageType::Sticker | MessageType::Video | MessageType::AnimatedGif
        )
    }

    /// Returns `true` for every media type.
    pub fn is_media(&self) -> bool {
        !matches!(self, MessageType::Unknown | MessageType::Text)
    }

    /// Returns all message types, `Unknown` first.
    pub fn all() -> &'static [MessageType] {
        &[
            MessageType::Unknown,
            MessageType::Text,
            MessageType::Photo,
            MessageType::Sticker,
            MessageType::Video,
            MessageType::AnimatedGif,
            MessageType::Audio,
            MessageType::Voice,
        ]
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Unknown => write!(f, "unknown"),
            MessageType::Text => write!(f, "text"),
            MessageType::Photo => write!(f, "photo"),
            MessageType::Sticker => write!(f, "sticker"),
            MessageType::Video => write!(f, "video"),
            MessageType::AnimatedGif => write!(f, "animated_gif"),
            MessageType::Audio => write!(f, "audio"),
            MessageType::Voice => write!(f, "voice"),
        }
    }
}

/// Type-specific message payload.
///
/// Only text messages carry inline content; media messages reference files
/// through [`Message::media_path`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Content {
    #[default]
    None,
    Text(String),
}

impl Content {
    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::None => None,
        }
    }
}

/// One decoded chat entry.
///
/// Built once by the extractor and never modified afterwards; the pipeline
/// moves it from a worker buffer into the [`MessageRoom`].
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `String` | Element identifier, e.g. `message1234` |
/// | `sent_at` | `DateTime<Utc>` | Absolute send time |
/// | `sender_name` | `String` | Explicit or inherited sender |
/// | `reply_to_id` | `String` | Replied-to identifier, empty if none |
/// | `message_type` | [`MessageType`] | Classified payload kind |
/// | `content` | [`Content`] | Text payload for `Text` |
/// | `media_path` | `String` | Relative media link, empty if none |
/// | `media_thumbnail_path` | `String` | Relative thumbnail, empty if none |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    pub sent_at: DateTime<Utc>,

    pub sender_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reply_to_id: String,

    #[serde(default)]
    pub message_type: MessageType,

    #[serde(default)]
    pub content: Content,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_thumbnail_path: String,
}

impl Message {
    /// Creates a message of [`MessageType::Unknown`] with no payload.
    pub fn new(id: impl Into<String>, sent_at: DateTime<Utc>, sender_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sent_at,
            sender_name: sender_name.into(),
            reply_to_id: String::new(),
            message_type: MessageType::Unknown,
            content: Content::None,
            media_path: String::new(),
            media_thumbnail_path: String::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Makes this a text message.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.message_type = MessageType::Text;
        self.content = Content::Text(text.into());
        self.media_path.clear();
        self.media_thumbnail_path.clear();
        self
    }

    /// Makes this a media message of the given type.
    ///
    /// The thumbnail is dropped for types without one (audio, voice).
    ///
    /// ```
    /// use tgroom::{Message, MessageType};
    /// use chrono::Utc;
    ///
    /// let msg = Message::new("m1", Utc::now(), "Bob")
    ///     .with_media(MessageType::Voice, "voice/1.ogg", "ignored.jpg");
    /// assert_eq!(msg.media_thumbnail_path, "");
    /// ```
    #[must_use]
    pub fn with_media(
        mut self,
        message_type: MessageType,
        media_path: impl Into<String>,
        thumbnail_path: impl Into<String>,
    ) -> Self {
        self.message_type = message_type;
        self.content = Content::None;
        self.media_path = media_path.into();
        self.media_thumbnail_path = if message_type.has_thumbnail() {
            thumbnail_path.into()
        } else {
            String::new()
        };
        self
    }

    /// Marks this message as a reply to `reply_to_id`.
    #[must_use]
    pub fn with_reply_to(mut self, reply_to_id: impl Into<String>) -> Self {
        self.reply_to_id = reply_to_id.into();
        self
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns the text payload for text messages.
    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }

    /// Returns `true` if this message replies to another one.
    pub fn is_reply(&self) -> bool {
        !self.reply_to_id.is_empty()
    }

    /// Returns `true` for photo, sticker, video, GIF, audio and voice messages.
    pub fn is_media(&self) -> bool {
        self.message_type.is_media()
    }
}

/// The aggregate result for one exported conversation.
///
/// `messages` has no guaranteed order across fragment files: the pipeline
/// merges worker results in completion order. Use
/// [`sort_chronological`](MessageRoom::sort_chronological) when a stable order
/// is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRoom {
    pub room_name: String,
    pub messages: Vec<Message>,
}

impl MessageRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the room name unless one is already recorded.
    ///
    /// Empty candidates are ignored. Returns `true` if the name was written.
    ///
    /// ```
    /// use tgroom::MessageRoom;
    ///
    /// let mut room = MessageRoom::new();
    /// assert!(room.set_room_name_if_empty("Family"));
    /// assert!(!room.set_room_name_if_empty("Work"));
    /// assert_eq!(room.room_name, "Family");
    /// ```
    pub fn set_room_name_if_empty(&mut self, name: &str) -> bool {
        if !self.room_name.is_empty() || name.is_empty() {
            return false;
        }
        self.room_name = name.to_string();
        true
    }

    /// Moves every message out of `buffer` into the room.
    pub fn append(&mut self, buffer: &mut Vec<Message>) {
        self.messages.append(buffer);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Sorts messages by send time, then by id. Stable.
    pub fn sort_chronological(&mut self) {
        self.messages
            .sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then_with(|| a.id.cmp(&b.id)));
    }

    /// Returns the distinct sender names, sorted.
    pub fn senders(&self) -> BTreeSet<&str> {
        self.messages
            .iter()
            .map(|m| m.sender_name.as_str())
            .filter(|name| !name.is_empty())
            .collect()
    }
}
