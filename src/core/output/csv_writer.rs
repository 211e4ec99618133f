//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::MessageRoom;

/// Writes the room's messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `ID`, `Sender`, `Type`, `Content` plus, depending on OutputConfig:
///   - With timestamps: `Date` after `ID`
///   - With media: `Media`, `Thumbnail`
///   - With replies: `ReplyTo`
/// - Encoding: UTF-8
pub fn write_csv(room: &MessageRoom, output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(room, file, config)
}

/// Converts the room's messages to a CSV string.
pub fn to_csv(room: &MessageRoom, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(room, &mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_records<W: Write>(room: &MessageRoom, sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in &room.messages {
        writer.write_record(build_record(&MessageRecord::new(msg, config), config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["ID"];

    if config.include_timestamps {
        header.push("Date");
    }

    header.extend(["Sender", "Type", "Content"]);

    if config.include_media {
        header.extend(["Media", "Thumbnail"]);
    }
    if config.include_replies {
        header.push("ReplyTo");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(record: &MessageRecord<'_>, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![record.id.to_string()];

    if config.include_timestamps {
        row.push(record.sent_at.clone().unwrap_or_default());
    }

    row.push(record.sender.to_string());
    row.push(record.message_type.to_string());
    row.push(record.text.unwrap_or_default().to_string());

    if config.include_media {
        row.push(record.media.unwrap_or_default().to_string());
        row.push(record.thumbnail.unwrap_or_default().to_string());
    }
    if config.include_replies {
        row.push(record.reply_to.unwrap_or_default().to_string());
    }

    row
}
