//! Capability interface that discovery and reporting need from a source language.

use std::fmt;
use std::path::{Path, PathBuf};

/// What the submission pipeline needs to know about the configured language.
///
/// Tokenizing and comparing happen elsewhere; this trait only exposes the
/// naming and view-file conventions used while building submissions and
/// copying their files into a report.
pub trait LanguageFrontend: Send + Sync + fmt::Debug {
    /// Human-friendly language name written into the report overview.
    fn display_name(&self) -> &str;

    /// Whether the report shows a generated view file instead of the raw source.
    fn uses_alternate_view_files(&self) -> bool {
        false
    }

    /// Suffix appended to a source file's path to locate its view file.
    fn view_file_suffix(&self) -> &str {
        ""
    }

    /// The file a report shows in place of `file`.
    fn displayed_path(&self, file: &Path) -> PathBuf {
        if self.uses_alternate_view_files() {
            let mut view = file.as_os_str().to_owned();
            view.push(self.view_file_suffix());
            PathBuf::from(view)
        } else {
            file.to_path_buf()
        }
    }
}
