//! Run configuration for discovery and report assembly.
//!
//! [`RunOptions`] is the single configuration bundle consumed by both the
//! discovery engine and the report assembler. It can be loaded from and saved
//! to YAML; the CLI layers its flags on top of a loaded file.

pub mod validation;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::errors::{CribError, Result};
use crate::discovery::exclusions::load_exclusion_file;
use crate::lang::common::LanguageFrontend;
use crate::lang::registry;

pub use validation::{validate_non_blank, validate_patterns, validate_positive_u32};

/// Options shared by discovery and report assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunOptions {
    /// Directory whose immediate entries are the submissions
    #[serde(default = "RunOptions::default_root_directory")]
    pub root_directory: PathBuf,

    /// Secondary submission roots, listed in the report overview only
    #[serde(default)]
    pub legacy_root_directories: Vec<PathBuf>,

    /// Registry key of the source language
    #[serde(default = "RunOptions::default_language")]
    pub language: String,

    /// Accepted file name suffixes; empty accepts every file
    #[serde(default)]
    pub file_suffixes: Vec<String>,

    /// Basecode as an explicit path or as the name of a root entry
    #[serde(default)]
    pub basecode: Option<String>,

    /// Subdirectory inside each submission directory that holds the content
    #[serde(default)]
    pub subdirectory: Option<String>,

    /// File name patterns excluded from discovery (trailing match)
    #[serde(default)]
    pub excluded_files: Vec<String>,

    /// Optional file with one exclusion pattern per line
    #[serde(default)]
    pub exclusion_file: Option<PathBuf>,

    /// Number of top comparisons kept in the report; 0 keeps all
    #[serde(default = "RunOptions::default_maximum_comparisons")]
    pub maximum_comparisons: usize,

    /// Minimum token match used by the comparison stage
    #[serde(default = "RunOptions::default_match_sensitivity")]
    pub match_sensitivity: u32,
}

/// Default implementation for [`RunOptions`].
impl Default for RunOptions {
    fn default() -> Self {
        Self {
            root_directory: Self::default_root_directory(),
            legacy_root_directories: Vec::new(),
            language: Self::default_language(),
            file_suffixes: Vec::new(),
            basecode: None,
            subdirectory: None,
            excluded_files: Vec::new(),
            exclusion_file: None,
            maximum_comparisons: Self::default_maximum_comparisons(),
            match_sensitivity: Self::default_match_sensitivity(),
        }
    }
}

/// Default value providers for [`RunOptions`].
impl RunOptions {
    fn default_root_directory() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_language() -> String {
        "java".to_string()
    }

    const fn default_maximum_comparisons() -> usize {
        100
    }

    const fn default_match_sensitivity() -> u32 {
        9
    }
}

impl RunOptions {
    /// Create options for the given submission root.
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            ..Self::default()
        }
    }

    /// Set the language key.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the accepted file suffixes.
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the basecode name or path.
    pub fn with_basecode(mut self, basecode: impl Into<String>) -> Self {
        self.basecode = Some(basecode.into());
        self
    }

    /// Set the per-submission subdirectory.
    pub fn with_subdirectory(mut self, subdirectory: impl Into<String>) -> Self {
        self.subdirectory = Some(subdirectory.into());
        self
    }

    /// Set the comparison cap for reports.
    pub fn with_maximum_comparisons(mut self, maximum: usize) -> Self {
        self.maximum_comparisons = maximum;
        self
    }

    /// Whether a basecode is configured.
    pub fn has_basecode(&self) -> bool {
        self.basecode.is_some()
    }

    /// Resolve the configured language through the built-in registry.
    pub fn frontend(&self) -> Result<Arc<dyn LanguageFrontend>> {
        registry::frontend_for(&self.language).ok_or_else(|| {
            CribError::config_field(
                format!(
                    "Unknown language '{}'. Supported: {}",
                    self.language,
                    registry::language_keys().join(", ")
                ),
                "language",
            )
        })
    }

    /// Fill in the language's default suffixes when none are configured.
    pub fn apply_language_defaults(&mut self) -> Result<()> {
        if self.file_suffixes.is_empty() {
            let info = registry::language_info(&self.language).ok_or_else(|| {
                CribError::config_field(format!("Unknown language '{}'", self.language), "language")
            })?;
            self.file_suffixes = info.suffixes.iter().map(|s| (*s).to_string()).collect();
        }
        Ok(())
    }

    /// Every exclusion pattern: inline patterns first, then the exclusion file.
    pub fn exclusion_set(&self) -> Result<IndexSet<String>> {
        let mut set: IndexSet<String> = self.excluded_files.iter().cloned().collect();
        if let Some(path) = &self.exclusion_file {
            set.extend(load_exclusion_file(path)?);
        }
        Ok(set)
    }

    /// Load options from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CribError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save options to a YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| {
            CribError::io(format!("Failed to write config file: {}", path.display()), e)
        })
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<()> {
        validate_positive_u32(self.match_sensitivity, "match_sensitivity")?;
        validate_patterns(&self.file_suffixes, "file_suffixes")?;
        validate_patterns(&self.excluded_files, "excluded_files")?;
        validate_non_blank(self.subdirectory.as_deref(), "subdirectory")?;
        validate_non_blank(self.basecode.as_deref(), "basecode")?;
        if registry::language_info(&self.language).is_none() {
            return Err(CribError::config_field(
                format!("Unknown language '{}'", self.language),
                "language",
            ));
        }
        Ok(())
    }
}
