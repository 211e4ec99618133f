//! # tgroom
//!
//! Decodes Telegram Desktop HTML chat exports into one typed, in-memory
//! message room.
//!
//! ## Overview
//!
//! Telegram Desktop exports a chat as a directory of HTML fragments
//! (`messages.html`, `messages2.html`, ...) next to media folders. tgroom:
//!
//! - finds the fragments ([`discovery`])
//! - splits them across a fixed pool of worker threads ([`pipeline`])
//! - decodes each document in order, resolving continuation senders and
//!   classifying content as text or one of six media kinds ([`parsing`])
//! - converts local date titles to UTC with a shared, memoized zone lookup
//!   ([`time`])
//! - merges every worker's buffer into one [`MessageRoom`] under a single lock
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tgroom::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = RoomParser::with_config(ParseConfig::new().with_time_zone("Asia/Jakarta"));
//!     let mut room = parser.parse("ChatExport_2020-01-01".as_ref())?;
//!
//!     // Order across fragment files is not guaranteed
//!     room.sort_chronological();
//!
//!     for msg in room.messages.iter().filter(|m| m.message_type == MessageType::Text) {
//!         println!("{}: {}", msg.sender_name, msg.text().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`RoomParser`], the entry point
//! - [`config`] - [`ParseConfig`](config::ParseConfig)
//! - [`message`] - [`Message`], [`MessageRoom`], [`MessageType`], [`Content`]
//! - [`parsing`] - per-document decoding
//! - [`pipeline`] - partitioning and parallel aggregation
//! - [`discovery`] - fragment file lookup
//! - [`time`] - [`TimeResolver`](time::TimeResolver)
//! - [`core`] - output writers, [`OutputConfig`](core::OutputConfig), [`RoomStats`](core::RoomStats)
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - [`TgroomError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod pipeline;
pub mod time;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TgroomError};
pub use message::{Content, Message, MessageRoom, MessageType};
pub use parser::RoomParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use tgroom::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TgroomError};
    pub use crate::message::{Content, Message, MessageRoom, MessageType};

    pub use crate::config::ParseConfig;
    pub use crate::parser::RoomParser;
    pub use crate::pipeline::RunSummary;

    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::RoomStats;
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
