//! Turning a root directory into a validated submission set.

use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use super::basecode::{default_strategies, resolve_basecode, BasecodeOrigin, BasecodeRequest, BasecodeStrategy};
use super::filters::{entry_name, EntryFilter};
use super::submission::{Submission, SubmissionSet};
use super::walk::collect_files;
use crate::core::config::RunOptions;
use crate::core::diagnostics::{DiagnosticKind, Diagnostics};
use crate::core::errors::{CribError, Result};
use crate::lang::common::LanguageFrontend;

/// Builds single submissions from root entries or explicit paths.
#[derive(Debug, Clone)]
pub struct SubmissionFactory {
    filter: EntryFilter,
    subdirectory: Option<String>,
    language: Arc<dyn LanguageFrontend>,
}

impl SubmissionFactory {
    /// Create a factory.
    pub fn new(
        filter: EntryFilter,
        subdirectory: Option<String>,
        language: Arc<dyn LanguageFrontend>,
    ) -> Self {
        Self {
            filter,
            subdirectory,
            language,
        }
    }

    /// Reason the entry is not a submission candidate, if any.
    pub fn exclusion_reason(&self, entry: &Path) -> Option<String> {
        self.filter.exclusion_reason(entry)
    }

    /// Build a submission from an entry that passed [`Self::exclusion_reason`].
    ///
    /// Directory entries descend into the configured subdirectory first; the
    /// submission keeps the entry's own name either way.
    pub fn build(&self, entry: &Path) -> Result<Submission> {
        let name = entry_name(entry);
        let root = match &self.subdirectory {
            Some(subdirectory) if entry.is_dir() => {
                let candidate = entry.join(subdirectory);
                if !candidate.exists() {
                    return Err(CribError::submission(
                        format!(
                            "Submission {name} does not contain the given subdirectory '{subdirectory}'"
                        ),
                        name,
                    ));
                }
                if !candidate.is_dir() {
                    return Err(CribError::submission(
                        format!("The given subdirectory '{subdirectory}' is not a directory!"),
                        name,
                    ));
                }
                candidate
            }
            _ => entry.to_path_buf(),
        };

        let files = collect_files(&root, &self.filter);
        debug!("Submission {} has {} file(s)", name, files.len());
        Ok(Submission::new(name, root, files, Arc::clone(&self.language)))
    }
}

/// Discovery of the submissions below one root directory.
pub struct SubmissionSetBuilder {
    root: PathBuf,
    basecode: Option<String>,
    factory: SubmissionFactory,
    strategies: Vec<Box<dyn BasecodeStrategy>>,
}

impl SubmissionSetBuilder {
    /// Create a builder for `root` using the options' language, suffixes, basecode and subdirectory.
    pub fn new(
        root: impl Into<PathBuf>,
        options: &RunOptions,
        exclusions: IndexSet<String>,
    ) -> Result<Self> {
        let language = options.frontend()?;
        let filter = EntryFilter::new(options.file_suffixes.clone(), exclusions);
        Ok(Self {
            root: root.into(),
            basecode: options.basecode.clone(),
            factory: SubmissionFactory::new(filter, options.subdirectory.clone(), language),
            strategies: default_strategies(),
        })
    }

    /// Create a builder for the options' own root directory and exclusion set.
    pub fn from_options(options: &RunOptions) -> Result<Self> {
        Self::new(
            options.root_directory.clone(),
            options,
            options.exclusion_set()?,
        )
    }

    /// Replace the basecode resolution strategies.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn BasecodeStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Run discovery.
    ///
    /// Root entries are visited in lexicographic order. Excluded entries are
    /// recorded as diagnostics and skipped; any other entry that cannot be
    /// turned into a submission aborts discovery.
    pub fn build(&self, diagnostics: &mut Diagnostics) -> Result<SubmissionSet> {
        self.verify_root()?;
        let mut discovered = self.collect_root_submissions(diagnostics)?;

        let basecode = match &self.basecode {
            Some(configured) => Some(self.extract_basecode(configured, &mut discovered, diagnostics)?),
            None => None,
        };

        let submissions: Vec<Submission> = discovered.into_values().collect();
        info!(
            "Discovered {} submission(s){}",
            submissions.len(),
            if basecode.is_some() { " and a basecode" } else { "" }
        );
        Ok(SubmissionSet::new(submissions, basecode))
    }

    fn verify_root(&self) -> Result<()> {
        let name = entry_name(&self.root);
        if !self.root.exists() {
            return Err(CribError::root_directory(format!(
                "Root directory \"{name}\" does not exist!"
            )));
        }
        if !self.root.is_dir() {
            return Err(CribError::root_directory(format!(
                "Root directory \"{name}\" is not a directory!"
            )));
        }
        Ok(())
    }

    fn read_root_entries(&self) -> Result<Vec<String>> {
        let listing_error = |e: std::io::Error| {
            CribError::root_directory_io("Cannot list files of the root directory!", e)
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(listing_error)? {
            let entry = entry.map_err(listing_error)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn collect_root_submissions(
        &self,
        diagnostics: &mut Diagnostics,
    ) -> Result<IndexMap<String, Submission>> {
        let mut discovered = IndexMap::new();
        for name in self.read_root_entries()? {
            let entry = self.root.join(&name);
            if let Some(reason) = self.factory.exclusion_reason(&entry) {
                diagnostics.info(DiagnosticKind::Exclusion, reason);
                continue;
            }
            let submission = self.factory.build(&entry)?;
            discovered.insert(name, submission);
        }
        Ok(discovered)
    }

    fn extract_basecode(
        &self,
        configured: &str,
        discovered: &mut IndexMap<String, Submission>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Submission> {
        let request = BasecodeRequest {
            configured,
            discovered,
            factory: &self.factory,
        };
        let (basecode, origin) = resolve_basecode(&self.strategies, &request)?;

        if origin == BasecodeOrigin::RootEntry {
            diagnostics.warning(
                DiagnosticKind::Deprecation,
                format!(
                    "Deprecated use of the basecode option found, please specify the basecode as \"{}{}{}\" instead.",
                    self.root.display(),
                    MAIN_SEPARATOR,
                    configured
                ),
            );
        }
        diagnostics.info(
            DiagnosticKind::Basecode,
            format!("Basecode directory \"{}\" will be used.", basecode.root().display()),
        );

        let duplicate = discovered
            .iter()
            .position(|(_, submission)| submission.same_location(&basecode));
        if let Some(index) = duplicate {
            if let Some((_, removed)) = discovered.shift_remove_index(index) {
                diagnostics.info(
                    DiagnosticKind::RedundantSubmission,
                    format!("Skipping \"{}\" as user submission.", removed.root().display()),
                );
            }
        }

        Ok(basecode)
    }
}

/// Discover the submission set below `root`.
pub fn discover(
    root: &Path,
    options: &RunOptions,
    exclusions: &IndexSet<String>,
    diagnostics: &mut Diagnostics,
) -> Result<SubmissionSet> {
    SubmissionSetBuilder::new(root, options, exclusions.clone())?.build(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::DiagnosticLevel;
    use tempfile::{tempdir, TempDir};

    fn write(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class A {}").unwrap();
    }

    fn course() -> TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(&root.join("alice/A.java"));
        write(&root.join("bob/B.java"));
        write(&root.join("base/T.java"));
        dir
    }

    fn java_options() -> RunOptions {
        RunOptions::default().with_suffixes([".java"])
    }

    fn names(set: &SubmissionSet) -> Vec<&str> {
        set.submissions().iter().map(Submission::name).collect()
    }

    #[test]
    fn test_discovers_sorted_submissions() {
        let dir = course();
        let mut diagnostics = Diagnostics::new();
        let set = discover(dir.path(), &java_options(), &IndexSet::new(), &mut diagnostics).unwrap();

        assert_eq!(names(&set), vec!["alice", "base", "bob"]);
        assert!(!set.has_basecode());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_root_entry_basecode_is_deprecated_and_removed_from_regulars() {
        let dir = course();
        let options = java_options().with_basecode("base");
        let mut diagnostics = Diagnostics::new();
        let set = discover(dir.path(), &options, &IndexSet::new(), &mut diagnostics).unwrap();

        assert_eq!(names(&set), vec!["alice", "bob"]);
        assert_eq!(set.basecode().map(Submission::name), Some("base"));

        let deprecations: Vec<_> = diagnostics.of_kind(DiagnosticKind::Deprecation).collect();
        assert_eq!(deprecations.len(), 1);
        assert_eq!(deprecations[0].level, DiagnosticLevel::Warning);
        assert!(deprecations[0].message.ends_with(&format!("{}base\" instead.", MAIN_SEPARATOR)));
        assert!(diagnostics.contains(DiagnosticKind::RedundantSubmission));
    }

    #[test]
    fn test_dotted_basecode_name_fails() {
        let dir = course();
        let options = java_options().with_basecode("my.base");
        let err = discover(dir.path(), &options, &IndexSet::new(), &mut Diagnostics::new()).unwrap_err();
        assert!(err.is_basecode());
        assert!(err.to_string().contains("\"my.base\" cannot contain dots!"));
    }

    #[test]
    fn test_explicit_basecode_outside_root() {
        let dir = course();
        let outside = tempdir().unwrap();
        write(&outside.path().join("template/T.java"));
        let template = outside.path().join("template");

        let options = java_options().with_basecode(template.to_string_lossy());
        let mut diagnostics = Diagnostics::new();
        let set = discover(dir.path(), &options, &IndexSet::new(), &mut diagnostics).unwrap();

        assert_eq!(set.number_of_submissions(), 3);
        assert_eq!(set.basecode().map(Submission::name), Some("template"));
        assert!(!diagnostics.contains(DiagnosticKind::Deprecation));
        assert!(!diagnostics.contains(DiagnosticKind::RedundantSubmission));
    }

    #[test]
    fn test_explicit_basecode_inside_root_skips_user_submission() {
        let dir = course();
        let options = java_options().with_basecode(dir.path().join("base").to_string_lossy());
        let mut diagnostics = Diagnostics::new();
        let set = discover(dir.path(), &options, &IndexSet::new(), &mut diagnostics).unwrap();

        assert_eq!(names(&set), vec!["alice", "bob"]);
        assert!(!diagnostics.contains(DiagnosticKind::Deprecation));
        assert!(diagnostics.contains(DiagnosticKind::RedundantSubmission));
    }

    #[test]
    fn test_excluded_and_invalid_entries_are_reported() {
        let dir = course();
        write(&dir.path().join("README.md"));
        write(&dir.path().join("Single.java"));
        write(&dir.path().join("old_build/X.java"));

        let exclusions: IndexSet<String> = ["build".to_string()].into_iter().collect();
        let mut diagnostics = Diagnostics::new();
        let set = discover(dir.path(), &java_options(), &exclusions, &mut diagnostics).unwrap();

        assert_eq!(names(&set), vec!["Single.java", "alice", "base", "bob"]);
        let messages: Vec<_> = diagnostics
            .of_kind(DiagnosticKind::Exclusion)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Ignore submission with invalid suffix: README.md",
                "Exclude submission: old_build",
            ]
        );
    }

    #[test]
    fn test_subdirectory_errors_abort_discovery() {
        let dir = course();
        fs::create_dir_all(dir.path().join("alice/src")).unwrap();
        let options = java_options().with_subdirectory("src");
        let err = discover(dir.path(), &options, &IndexSet::new(), &mut Diagnostics::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Submission error: Submission base does not contain the given subdirectory 'src'"
        );

        let file_dir = course();
        for name in ["alice", "base", "bob"] {
            write(&file_dir.path().join(name).join("src"));
        }
        let err = discover(file_dir.path(), &options, &IndexSet::new(), &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Submission error: The given subdirectory 'src' is not a directory!"
        );
    }

    #[test]
    fn test_subdirectory_keeps_entry_name() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("alice/src/A.java"));
        write(&dir.path().join("alice/notes/N.java"));

        let options = java_options().with_subdirectory("src");
        let set = discover(dir.path(), &options, &IndexSet::new(), &mut Diagnostics::new()).unwrap();
        let alice = &set.submissions()[0];
        assert_eq!(alice.name(), "alice");
        assert_eq!(alice.root(), dir.path().join("alice/src"));
        assert_eq!(alice.files().len(), 1);
    }

    #[test]
    fn test_root_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let err = discover(&missing, &java_options(), &IndexSet::new(), &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Root directory error: Root directory \"nowhere\" does not exist!"
        );

        let file = dir.path().join("plain.java");
        write(&file);
        let err = discover(&file, &java_options(), &IndexSet::new(), &mut Diagnostics::new())
            .unwrap_err();
        assert!(matches!(err, CribError::RootDirectory { .. }));
        assert!(err.to_string().contains("is not a directory!"));
    }
}
