//! Name-based exclusion and suffix filters.
//!
//! Both tests are plain trailing-substring matches on the full entry name, not
//! extension-aware comparisons: an exclusion pattern `"c"` excludes every name
//! ending in the letter `c`.

use std::path::Path;

use indexmap::IndexSet;

/// Exclusion and suffix rules applied to every entry during discovery.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    suffixes: Vec<String>,
    exclusions: IndexSet<String>,
}

impl EntryFilter {
    /// Create a filter from accepted suffixes and excluded name patterns.
    pub fn new(suffixes: Vec<String>, exclusions: IndexSet<String>) -> Self {
        Self {
            suffixes,
            exclusions,
        }
    }

    /// Whether a name ends with one of the exclusion patterns.
    pub fn is_name_excluded(&self, name: &str) -> bool {
        self.exclusions
            .iter()
            .any(|pattern| name.ends_with(pattern.as_str()))
    }

    /// Whether a name ends with an accepted suffix; with no suffixes every name passes.
    pub fn has_valid_suffix(&self, name: &str) -> bool {
        self.suffixes.is_empty()
            || self
                .suffixes
                .iter()
                .any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Whether the path's own name is excluded.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.is_name_excluded(&entry_name(path))
    }

    /// Whether the path is a plain file with an accepted suffix.
    pub fn is_accepted_file(&self, path: &Path) -> bool {
        path.is_file() && self.has_valid_suffix(&entry_name(path))
    }

    /// Reason a candidate submission entry must be skipped, if any.
    ///
    /// Directories are only rejected by name; plain files are also rejected
    /// when their name carries none of the accepted suffixes.
    pub fn exclusion_reason(&self, entry: &Path) -> Option<String> {
        let name = entry_name(entry);
        if self.is_name_excluded(&name) {
            return Some(format!("Exclude submission: {name}"));
        }
        if entry.is_file() && !self.has_valid_suffix(&name) {
            return Some(format!("Ignore submission with invalid suffix: {name}"));
        }
        None
    }

    /// Accepted suffixes.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Excluded name patterns.
    pub fn exclusions(&self) -> &IndexSet<String> {
        &self.exclusions
    }
}

/// The final component of a path as a string, or the whole path when it has none.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
