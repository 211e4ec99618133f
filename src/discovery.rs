//! Locating export fragments in a directory.
//!
//! Telegram Desktop splits a long chat into `messages.html`, `messages2.html`,
//! `messages3.html` and so on. Only the top level of the export directory is
//! searched; media folders (`photos/`, `video_files/`, ...) are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, TgroomError};

static FRAGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^messages([0-9]*)\.html$").expect("fragment pattern is a valid regex")
});

/// Returns `true` if `name` is an export fragment file name.
///
/// ```
/// use tgroom::discovery::is_fragment_name;
///
/// assert!(is_fragment_name("messages.html"));
/// assert!(is_fragment_name("messages12.html"));
/// assert!(!is_fragment_name("messages.html.bak"));
/// assert!(!is_fragment_name("notes.txt"));
/// ```
pub fn is_fragment_name(name: &str) -> bool {
    FRAGMENT_PATTERN.is_match(name)
}

/// Position of a fragment in the export: `messages.html` is 1,
/// `messagesN.html` is N. `None` for names that are not fragments.
pub fn fragment_index(name: &str) -> Option<u64> {
    let caps = FRAGMENT_PATTERN.captures(name)?;
    match &caps[1] {
        "" => Some(1),
        digits => digits.parse().ok().or(Some(u64::MAX)),
    }
}

/// Lists the fragment files directly under `root`, in export order.
///
/// Ties on the index (`messages2.html` and `messages02.html`) are broken by
/// file name so the order is stable across runs.
///
/// # Errors
///
/// [`TgroomError::InvalidDirectory`] if `root` cannot be listed or contains no
/// fragment files. I/O errors while reading individual entries are returned as
/// [`TgroomError::Io`].
pub fn index(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root)
        .map_err(|e| TgroomError::invalid_directory(root, format!("cannot be listed ({e})")))?;

    let mut fragments: Vec<(u64, String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(position) = fragment_index(name) {
            fragments.push((position, name.to_string(), entry.path()));
        }
    }

    if fragments.is_empty() {
        return Err(TgroomError::invalid_directory(
            root,
            "contains no messages*.html files",
        ));
    }

    fragments.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    debug!(dir = %root.display(), files = fragments.len(), "indexed export fragments");

    Ok(fragments.into_iter().map(|(_, _, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_fragment_index() {
        assert_eq!(fragment_index("messages.html"), Some(1));
        assert_eq!(fragment_index("messages2.html"), Some(2));
        assert_eq!(fragment_index("messages10.html"), Some(10));
        assert_eq!(fragment_index("Messages.html"), None);
        assert_eq!(fragment_index("messages.htm"), None);
        assert_eq!(fragment_index("xmessages.html"), None);
    }

    #[test]
    fn test_index_orders_numerically() {
        let dir = tempdir().unwrap();
        for name in ["messages10.html", "messages.html", "messages2.html", "messages3.html"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = index(dir.path()).unwrap();
        assert_eq!(
            names(&files),
            ["messages.html", "messages2.html", "messages3.html", "messages10.html"]
        );
    }

    #[test]
    fn test_index_skips_other_files_and_dirs() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("messages.html")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("style.css")).unwrap();
        fs::create_dir(dir.path().join("photos")).unwrap();
        fs::create_dir(dir.path().join("messages5.html")).unwrap();

        let files = index(dir.path()).unwrap();
        assert_eq!(names(&files), ["messages.html"]);
    }

    #[test]
    fn test_index_no_fragments() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let err = index(dir.path()).unwrap_err();
        assert!(err.is_invalid_directory());
        assert!(err.to_string().contains("no messages"));
    }

    #[test]
    fn test_index_missing_directory() {
        let dir = tempdir().unwrap();
        let err = index(&dir.path().join("absent")).unwrap_err();
        assert!(err.is_invalid_directory());
    }

    #[test]
    fn test_index_is_not_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("messages.html")).unwrap();

        assert!(index(dir.path()).is_err());
    }
}
