//! Submissions and the validated set produced by discovery.

use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::errors::{CribError, Result};
use crate::lang::common::LanguageFrontend;

/// One unit of work under comparison: a single file or a directory of files.
#[derive(Clone)]
pub struct Submission {
    name: String,
    root: PathBuf,
    canonical_root: PathBuf,
    files: Vec<PathBuf>,
    language: Arc<dyn LanguageFrontend>,
}

impl Submission {
    /// Create a submission, computing the canonical form of its root.
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        files: Vec<PathBuf>,
        language: Arc<dyn LanguageFrontend>,
    ) -> Self {
        let root = root.into();
        let canonical_root = canonicalize_root(&root);
        Self {
            name: name.into(),
            root,
            canonical_root,
            files,
            language,
        }
    }

    /// Display name (the root entry name, before any subdirectory is applied).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location the content files were collected from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical form of [`Submission::root`], used for identity comparisons.
    pub fn canonical_root(&self) -> &Path {
        &self.canonical_root
    }

    /// Content files in discovery order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Language frontend the submission was built with.
    pub fn language(&self) -> &Arc<dyn LanguageFrontend> {
        &self.language
    }

    /// Whether two submissions point at the same canonical location.
    pub fn same_location(&self, other: &Submission) -> bool {
        self.canonical_root == other.canonical_root
    }

    /// Location of the file the report shows for `file`.
    pub fn displayed_file(&self, file: &Path) -> PathBuf {
        self.language.displayed_path(file)
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("files", &self.files.len())
            .field("language", &self.language.display_name())
            .finish()
    }
}

impl PartialEq for Submission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.canonical_root == other.canonical_root
    }
}

impl Eq for Submission {}

impl Hash for Submission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.canonical_root.hash(state);
    }
}

fn canonicalize_root(root: &Path) -> PathBuf {
    fs::canonicalize(root)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

/// Regular submissions plus an optional basecode submission.
///
/// The basecode never appears among the regular submissions, and no regular
/// submission shares its canonical root.
#[derive(Debug, Clone, Default)]
pub struct SubmissionSet {
    submissions: Vec<Submission>,
    basecode: Option<Submission>,
}

impl SubmissionSet {
    /// Create a set, dropping any regular submission that shares the basecode's location.
    pub fn new(mut submissions: Vec<Submission>, basecode: Option<Submission>) -> Self {
        if let Some(base) = &basecode {
            submissions.retain(|submission| !submission.same_location(base));
        }
        Self {
            submissions,
            basecode,
        }
    }

    /// Regular submissions in discovery order.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// The basecode submission, if any.
    pub fn basecode(&self) -> Option<&Submission> {
        self.basecode.as_ref()
    }

    /// Whether a basecode submission is present.
    pub fn has_basecode(&self) -> bool {
        self.basecode.is_some()
    }

    /// Number of regular submissions.
    pub fn number_of_submissions(&self) -> usize {
        self.submissions.len()
    }

    /// Regular submissions followed by the basecode.
    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter().chain(self.basecode.iter())
    }

    /// Find a regular submission or the basecode by display name.
    pub fn submission_by_name(&self, name: &str) -> Option<&Submission> {
        self.iter().find(|submission| submission.name() == name)
    }

    /// Total content files across regular submissions and the basecode.
    pub fn total_files(&self) -> usize {
        self.iter().map(|submission| submission.files().len()).sum()
    }

    /// Fail unless at least two regular submissions are available for comparison.
    pub fn ensure_comparable(&self) -> Result<()> {
        if self.submissions.len() < 2 {
            return Err(CribError::validation_field(
                format!(
                    "Not enough valid submissions: found {}, need at least 2",
                    self.submissions.len()
                ),
                "submissions",
            ));
        }
        Ok(())
    }
}
