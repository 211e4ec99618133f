//! Room statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::message::{MessageRoom, MessageType};

/// Statistics about a decoded room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub total: usize,
    pub by_type: BTreeMap<MessageType, usize>,
    pub senders: usize,
    pub replies: usize,
}

impl RoomStats {
    pub fn from_room(room: &MessageRoom) -> Self {
        let mut by_type = BTreeMap::new();
        let mut replies = 0;
        for msg in &room.messages {
            *by_type.entry(msg.message_type).or_insert(0) += 1;
            if msg.is_reply() {
                replies += 1;
            }
        }

        Self {
            total: room.len(),
            by_type,
            senders: room.senders().len(),
            replies,
        }
    }

    /// Number of messages of type `ty`.
    pub fn count(&self, ty: MessageType) -> usize {
        self.by_type.get(&ty).copied().unwrap_or(0)
    }

    /// Number of media messages of any kind.
    pub fn media(&self) -> usize {
        self.by_type
            .iter()
            .filter(|(ty, _)| ty.is_media())
            .map(|(_, n)| n)
            .sum()
    }

    /// Share of messages that are media, in percent.
    pub fn media_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.media() as f64 / self.total as f64 * 100.0
    }
}
