//! Output shaping options.

use serde::{Deserialize, Serialize};

/// Configuration for output format.
/// Controls which optional fields are written for each message.
///
/// `id`, `sender` and `type` are always written; text content is written
/// whenever the message has it.
///
/// ```rust
/// use tgroom::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_replies();
/// assert!(config.include_timestamps);
/// assert!(!config.include_media);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include send times (UTC, RFC 3339)
    pub include_timestamps: bool,
    /// Include media and thumbnail paths
    pub include_media: bool,
    /// Include reply references
    pub include_replies: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field enabled.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_media: true,
            include_replies: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_media(mut self) -> Self {
        self.include_media = true;
        self
    }

    #[must_use]
    pub fn with_replies(mut self) -> Self {
        self.include_replies = true;
        self
    }

    /// Drops media and thumbnail paths from the output.
    #[must_use]
    pub fn without_media(mut self) -> Self {
        self.include_media = false;
        self
    }
}
