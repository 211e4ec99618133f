//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::MessageRoom;

#[derive(Serialize)]
struct JsonRoom<'a> {
    room_name: &'a str,
    messages: Vec<MessageRecord<'a>>,
}

impl<'a> JsonRoom<'a> {
    fn new(room: &'a MessageRoom, config: &OutputConfig) -> Self {
        Self {
            room_name: &room.room_name,
            messages: room
                .messages
                .iter()
                .map(|m| MessageRecord::new(m, config))
                .collect(),
        }
    }
}

/// Writes the room to a JSON file.
///
/// # Format
/// ```json
/// {
///   "room_name": "Rustaceans",
///   "messages": [
///     {"id": "message1", "sender": "Alice", "type": "text", "text": "Hello"},
///     {"id": "message2", "sender": "Alice", "type": "photo"}
///   ]
/// }
/// ```
pub fn write_json(room: &MessageRoom, output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &JsonRoom::new(room, config))?;
    writer.flush()?;
    Ok(())
}

/// Converts the room to a JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(room: &MessageRoom, config: &OutputConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonRoom::new(room, config))?)
}
