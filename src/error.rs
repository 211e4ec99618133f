//! Unified error types for tgroom.
//!
//! This module provides a single [`TgroomError`] enum that covers every failure
//! the extraction pipeline can surface to its caller.
//!
//! # Error Handling Policy
//!
//! - **Structural errors** (no fragment files, unresolvable zone) abort the run
//! - **Per-file errors** (unreadable file, malformed timestamp) abort the run
//!   too, wrapped in [`TgroomError::File`] so the offending path is reported.
//!   Files that decoded completely before the failure stay merged
//! - **Absent optional elements** (reply marker, thumbnail) are never errors;
//!   they decode to empty strings

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for tgroom operations.
///
/// # Example
///
/// ```rust
/// use tgroom::error::Result;
/// use tgroom::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TgroomError>;

/// The error type for all tgroom operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TgroomError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export root cannot be used.
    ///
    /// Raised when the directory cannot be listed or contains no
    /// `messages*.html` fragment files.
    #[error("Directory '{}' is not a valid export: it {cause}", path.display())]
    InvalidDirectory {
        /// The root directory that was scanned
        path: PathBuf,
        /// Human-readable reason
        cause: String,
    },

    /// A date title did not match `DD.MM.YYYY HH:MM:SS`.
    #[error("Malformed timestamp '{input}': {reason}")]
    MalformedTimestamp {
        /// The raw date string
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// The configured time zone is not in the zone database.
    #[error("Unknown time zone '{zone}'")]
    UnresolvableTimeZone {
        /// The zone name that failed to resolve
        zone: String,
    },

    /// Decoding a single fragment file failed.
    #[error("Failed to decode {}: {source}", path.display())]
    File {
        /// The fragment file
        path: PathBuf,
        /// What went wrong inside it
        #[source]
        source: Box<TgroomError>,
    },

    /// A worker thread panicked before merging its results.
    #[error("Worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker's partition
        worker: usize,
    },

    /// User-supplied input (format name, option value) is not recognised.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of input that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TgroomError {
    /// Creates an invalid directory error.
    pub fn invalid_directory(path: impl Into<PathBuf>, cause: impl Into<String>) -> Self {
        TgroomError::InvalidDirectory {
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(input: impl Into<String>, reason: impl Into<String>) -> Self {
        TgroomError::MalformedTimestamp {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unresolvable time zone error.
    pub fn unresolvable_time_zone(zone: impl Into<String>) -> Self {
        TgroomError::UnresolvableTimeZone { zone: zone.into() }
    }

    /// Wraps an error with the fragment file it came from.
    pub fn in_file(path: impl Into<PathBuf>, source: TgroomError) -> Self {
        TgroomError::File {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TgroomError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns the innermost error, looking through [`TgroomError::File`].
    pub fn root_cause(&self) -> &TgroomError {
        match self {
            TgroomError::File { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self.root_cause(), TgroomError::Io(_))
    }

    /// Returns `true` if the export directory was rejected.
    pub fn is_invalid_directory(&self) -> bool {
        matches!(self, TgroomError::InvalidDirectory { .. })
    }

    /// Returns `true` if a date string could not be decoded.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self.root_cause(), TgroomError::MalformedTimestamp { .. })
    }

    /// Returns `true` if the configured time zone is unknown.
    pub fn is_unresolvable_time_zone(&self) -> bool {
        matches!(self.root_cause(), TgroomError::UnresolvableTimeZone { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
