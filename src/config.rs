//! Configuration types for export parsing.
//!
//! This module provides a plain configuration struct for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use tgroom::config::ParseConfig;
//! use tgroom::RoomParser;
//!
//! let config = ParseConfig::new()
//!     .with_time_zone("Asia/Jakarta")
//!     .with_workers(4);
//!
//! let parser = RoomParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Zone used when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Configuration for parsing one export directory.
///
/// The export's date titles carry no zone, so all of them are read as local
/// times in [`time_zone`](Self::time_zone).
///
/// # Example
///
/// ```rust
/// use tgroom::config::ParseConfig;
///
/// let config = ParseConfig::new().with_time_zone("Europe/Berlin");
/// assert_eq!(config.time_zone, "Europe/Berlin");
/// assert_eq!(config.workers, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// IANA zone name the export's local times are in (default: `UTC`)
    pub time_zone: String,

    /// Worker thread hint (default: `None`, one per available core)
    ///
    /// Clamped to the available parallelism and to the number of fragment
    /// files.
    pub workers: Option<usize>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            workers: None,
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-worker configuration.
    ///
    /// Useful for debugging and for comparing against parallel runs.
    pub fn sequential() -> Self {
        Self {
            workers: Some(1),
            ..Self::default()
        }
    }

    /// Sets the zone the export's local times are read in.
    #[must_use]
    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = zone.into();
        self
    }

    /// Sets the worker thread hint.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
}
