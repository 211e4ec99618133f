//! Output format selection.
//!
//! Library-first format type with no CLI framework dependency. The CLI has its
//! own `clap`-aware enum that converts into this one.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> tgroom::Result<()> {
//! use tgroom::format::{OutputFormat, write_to_format};
//! use tgroom::core::models::OutputConfig;
//! use tgroom::RoomParser;
//!
//! let room = RoomParser::new().parse("ChatExport".as_ref())?;
//!
//! // Pick the writer from the output path
//! let format = OutputFormat::from_path("room.jsonl")?;
//! write_to_format(&room, "room.jsonl", format, &OutputConfig::all())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::{Result, TgroomError};
use crate::message::MessageRoom;

/// Output format for decoded rooms.
///
/// - [`Json`](OutputFormat::Json) - one object with the room name and all messages
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
///
/// ```rust
/// use tgroom::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Room object with `room_name` and `messages` (default)
    #[default]
    Json,

    /// JSON Lines, also known as NDJSON
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use tgroom::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/room.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("room.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        ext.parse().map_err(|_| {
            TgroomError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv"),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> TgroomError {
    let feature = match format {
        OutputFormat::Csv => "csv-output",
        OutputFormat::Json | OutputFormat::Jsonl => "json-output",
    };
    TgroomError::invalid_format(
        "output",
        format!("Output format {format} requires the '{feature}' feature to be enabled"),
    )
}

/// Writes the room to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    room: &MessageRoom,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(room, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(room, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(room, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts the room to a string in the specified format.
///
/// ```rust
/// # #[cfg(feature = "csv-output")]
/// # fn example() -> tgroom::Result<()> {
/// use tgroom::format::{OutputFormat, to_format_string};
/// use tgroom::core::models::OutputConfig;
/// use tgroom::MessageRoom;
///
/// let csv = to_format_string(&MessageRoom::new(), OutputFormat::Csv, &OutputConfig::new())?;
/// assert_eq!(csv, "ID;Sender;Type;Content\n");
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string(room: &MessageRoom, format: OutputFormat, config: &OutputConfig) -> Result<String> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(room, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(room, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(room, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
