//! Utility functions for string handling and file system checks.
//!
//! - Whitespace normalisation for scraped text
//! - Truncation for log records and for console display
//! - Output directory validation for the JSON exporter

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Scraped headlines are split across text nodes and indented markup; this
/// turns them back into a single line.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a character
/// boundary) with an ellipsis and the number of dropped bytes appended.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits in `max` bytes, otherwise the kept prefix
/// with `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Truncate text for the console to at most `max_chars` characters.
///
/// Cuts on a word boundary when there is one in the kept text and appends
/// `...` whenever anything was dropped.
///
/// # Arguments
///
/// * `s` - Text to display, typically a snippet
/// * `max_chars` - Maximum number of characters kept before the `...`
pub fn truncate_for_display(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars).collect();
    let kept = match kept.rfind(' ') {
        Some(idx) if idx > 0 => &kept[..idx],
        _ => kept.as_str(),
    };
    format!("{}...", kept.trim_end())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory (and any missing parents) if needed, then writes and
/// removes a probe file.
///
/// # Arguments
///
/// * `path` - Directory that output files will be written into
///
/// # Returns
///
/// `Ok(())` if the directory exists and accepted the probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Probe with a sync write
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Acme \n\t posts  profit "), "Acme posts profit");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 3 would split the second one
        let result = truncate_for_log("éééé", 3);
        assert_eq!(result, "é…(+6 bytes)");
    }

    #[test]
    fn test_truncate_for_display_short() {
        assert_eq!(truncate_for_display("short text", 50), "short text");
    }

    #[test]
    fn test_truncate_for_display_cuts_on_word() {
        let s = "Acme Corp reported its best quarter ever on Tuesday";
        assert_eq!(truncate_for_display(s, 20), "Acme Corp reported...");
    }

    #[test]
    fn test_truncate_for_display_single_long_word() {
        assert_eq!(truncate_for_display("abcdefghij", 4), "abcd...");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }
}
