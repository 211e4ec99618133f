//! JSON Lines (JSONL) output writer.
//!
//! One message per line, no room envelope. Suited to line-oriented tools
//! (`jq -c`, `grep`) and to loading very large rooms incrementally.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::MessageRoom;

/// Writes the room's messages in JSONL format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"id":"message1","sender":"Alice","type":"text","text":"Hello"}
/// {"id":"message2","sender":"Bob","type":"voice"}
/// ```
pub fn write_jsonl(room: &MessageRoom, output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(room, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts the room's messages to a JSONL string.
pub fn to_jsonl(room: &MessageRoom, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(room, &mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_lines<W: Write>(room: &MessageRoom, writer: &mut W, config: &OutputConfig) -> Result<()> {
    for msg in &room.messages {
        serde_json::to_writer(&mut *writer, &MessageRecord::new(msg, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
