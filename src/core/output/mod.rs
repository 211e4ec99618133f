//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole room as one JSON object - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case | Keeps room name |
//! |--------|----------|-----------------|
//! | CSV | Spreadsheets, quick inspection | No |
//! | JSON | Structured data, APIs | Yes |
//! | JSONL | Streaming, line-oriented tools | No |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> tgroom::Result<()> {
//! use tgroom::core::output::{write_csv, write_json, to_jsonl};
//! use tgroom::core::models::OutputConfig;
//! use tgroom::RoomParser;
//!
//! let room = RoomParser::new().parse("ChatExport".as_ref())?;
//! let config = OutputConfig::all();
//!
//! write_csv(&room, "room.csv", &config)?;
//! write_json(&room, "room.json", &config)?;
//! let lines = to_jsonl(&room, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

use serde::Serialize;

use crate::core::models::OutputConfig;
use crate::message::{Message, MessageType};

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Flat view of a message shared by all writers.
/// Only includes fields enabled in `OutputConfig`; empty values are omitted.
#[derive(Debug, Serialize)]
pub(crate) struct MessageRecord<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
    pub sender: &'a str,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a str>,
}

impl<'a> MessageRecord<'a> {
    pub fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        let when = |on: bool, value: &'a str| (on && !value.is_empty()).then_some(value);

        Self {
            id: &msg.id,
            sent_at: config
                .include_timestamps
                .then(|| msg.sent_at.format(TIMESTAMP_FORMAT).to_string()),
            sender: &msg.sender_name,
            message_type: msg.message_type,
            text: msg.text(),
            media: when(config.include_media, msg.media_path.as_str()),
            thumbnail: when(config.include_media, msg.media_thumbnail_path.as_str()),
            reply_to: when(config.include_replies, msg.reply_to_id.as_str()),
        }
    }
}
