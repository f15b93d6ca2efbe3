//! Loading exclusion patterns from a text file.

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use crate::core::errors::{CribError, Result};

/// Read one exclusion pattern per line.
///
/// Lines are trimmed and blank lines skipped. Patterns keep the order of
/// their first occurrence.
pub fn load_exclusion_file(path: &Path) -> Result<IndexSet<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CribError::io(
            format!("Could not read exclusion file: {}", path.display()),
            e,
        )
    })?;

    let patterns = parse_exclusions(&content);
    debug!(
        "Loaded {} exclusion pattern(s) from {}",
        patterns.len(),
        path.display()
    );
    Ok(patterns)
}

fn parse_exclusions(content: &str) -> IndexSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_trims_and_deduplicates() {
        let set = parse_exclusions("a.java\r\n\n   \n b \na.java\n");
        let patterns: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(patterns, vec!["a.java", "b"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_exclusion_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CribError::Io { .. }));
    }
}
