//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`LogLevel`] - Default verbosity for the log subscriber
//! - [`init_logging`] - Installs the stderr `tracing` subscriber
//!
//! ```rust
//! use tgroom::cli::OutputFormat;
//!
//! let format = OutputFormat::Jsonl;
//! assert_eq!(format.to_string(), "JSONL");
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::{DEFAULT_TIME_ZONE, ParseConfig};

/// Decode a Telegram Desktop HTML chat export into a single message room.
#[derive(Parser, Debug, Clone)]
#[command(name = "tgroom")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    tgroom ChatExport_2020-01-01
    tgroom ChatExport -o room.csv -f csv --sort
    tgroom ChatExport --tz Asia/Jakarta -j 4
    RUST_LOG=tgroom=debug tgroom ChatExport")]
pub struct Args {
    /// Export directory containing messages*.html
    #[arg(value_name = "INPUT_DIR")]
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = "room.json")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Worker threads (default: one per core, at most one per file)
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Time zone the export's local times are in
    #[arg(long = "tz", value_name = "ZONE", default_value = DEFAULT_TIME_ZONE)]
    pub time_zone: String,

    /// Sort messages by send time before writing
    #[arg(long)]
    pub sort: bool,

    /// Leave media and thumbnail paths out of the output
    #[arg(long)]
    pub no_media: bool,

    /// Log verbosity (RUST_LOG overrides)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Args {
    /// Library configuration for this invocation.
    pub fn parse_config(&self) -> ParseConfig {
        let config = ParseConfig::new().with_time_zone(self.time_zone.clone());
        match self.workers {
            Some(n) => config.with_workers(n),
            None => config,
        }
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - the room as one object (default)
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Room object with name and messages
    #[default]
    Json,

    /// JSON Lines - one message per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

/// Default log level when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `level`.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: LogLevel) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).try_init()
}
