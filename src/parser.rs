//! Entry point for decoding an export directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use tgroom::config::ParseConfig;
//! use tgroom::RoomParser;
//!
//! let parser = RoomParser::with_config(ParseConfig::new().with_time_zone("Asia/Jakarta"));
//! let mut room = parser.parse("ChatExport_2020-01-01".as_ref())?;
//! room.sort_chronological();
//!
//! println!("{}: {} messages", room.room_name, room.len());
//! # Ok::<(), tgroom::TgroomError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ParseConfig;
use crate::discovery;
use crate::error::Result;
use crate::message::MessageRoom;
use crate::parsing::{DecodedDocument, ExtractContext, decode};
use crate::pipeline::{self, RunSummary};
use crate::time::TimeResolver;

/// Parser for Telegram Desktop HTML exports.
///
/// An export directory holds `messages.html`, `messages2.html`, ... plus media
/// folders. The parser decodes every fragment in parallel and collects the
/// user messages into one [`MessageRoom`].
///
/// The parser owns the zone cache, so reusing one parser across runs with the
/// same zone skips the zone lookup.
#[derive(Debug, Default)]
pub struct RoomParser {
    config: ParseConfig,
    resolver: TimeResolver,
}

impl RoomParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self {
            config,
            resolver: TimeResolver::new(),
        }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Decodes the export under `root` into a new room.
    ///
    /// Message order across fragment files is not guaranteed; call
    /// [`MessageRoom::sort_chronological`] if it matters.
    ///
    /// # Errors
    ///
    /// - [`TgroomError::InvalidDirectory`](crate::TgroomError::InvalidDirectory)
    ///   if `root` holds no fragment files
    /// - [`TgroomError::UnresolvableTimeZone`](crate::TgroomError::UnresolvableTimeZone)
    ///   if the configured zone is unknown
    /// - [`TgroomError::File`](crate::TgroomError::File) if a fragment cannot
    ///   be read or has a malformed date
    pub fn parse(&self, root: &Path) -> Result<MessageRoom> {
        let mut room = MessageRoom::new();
        self.parse_into(root, &mut room)?;
        Ok(room)
    }

    /// Decodes the export under `root`, appending to an existing room.
    ///
    /// The room's name is only set if it is still empty. On error the room
    /// may hold messages from fragments that were already merged.
    pub fn parse_into(&self, root: &Path, room: &mut MessageRoom) -> Result<RunSummary> {
        let files = discovery::index(root)?;
        info!(dir = %root.display(), files = files.len(), "parsing export");
        self.parse_files(&files, room)
    }

    /// Decodes an explicit list of fragment files, in the given order.
    pub fn parse_files(&self, files: &[PathBuf], room: &mut MessageRoom) -> Result<RunSummary> {
        pipeline::run(files, self.config.workers, room, &self.context())
    }

    /// Decodes one fragment held in memory.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tgroom::RoomParser;
    ///
    /// let html = r#"<div class="message default" id="message1"><div class="body">
    ///   <div class="date" title="01.01.2020 12:00:00"></div>
    ///   <div class="from_name">Alice</div><div class="text">Hi</div>
    /// </div></div>"#;
    ///
    /// let doc = RoomParser::new().parse_str(html)?;
    /// assert_eq!(doc.messages[0].text(), Some("Hi"));
    /// # Ok::<(), tgroom::TgroomError>(())
    /// ```
    pub fn parse_str(&self, html: &str) -> Result<DecodedDocument> {
        decode(html, &self.context())
    }

    fn context(&self) -> ExtractContext<'_> {
        ExtractContext::new(&self.resolver, &self.config.time_zone)
    }
}
