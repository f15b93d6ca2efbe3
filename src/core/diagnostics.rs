//! Append-only diagnostics sink threaded through discovery and report assembly.
//!
//! Every run owns its own [`Diagnostics`] value. Records keep the order in
//! which they were pushed and are also forwarded to `tracing`, so a caller can
//! either drain them after the run or simply rely on the log output.

use serde::Serialize;
use tracing::{error, info, warn};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Informational notice
    Info,
    /// Something was skipped or is deprecated
    Warning,
    /// A best-effort step failed
    Error,
}

/// What a diagnostic record is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A root entry was excluded by name or suffix
    Exclusion,
    /// The basecode that will be used
    Basecode,
    /// Legacy basecode configuration was used
    Deprecation,
    /// A regular submission was dropped because it is the basecode
    RedundantSubmission,
    /// A report directory could not be created
    DirectoryCreation,
    /// A submission file could not be copied into the report
    FileCopy,
    /// A comparison detail file could not be written
    ComparisonWrite,
    /// The overview document could not be written
    Overview,
    /// The report directory could not be archived
    Packaging,
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Category
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
}

/// Ordered collection of diagnostics produced by a single run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and forwards it to the log.
    pub fn push(&mut self, level: DiagnosticLevel, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        match level {
            DiagnosticLevel::Info => info!(kind = ?kind, "{}", message),
            DiagnosticLevel::Warning => warn!(kind = ?kind, "{}", message),
            DiagnosticLevel::Error => error!(kind = ?kind, "{}", message),
        }
        self.records.push(Diagnostic {
            level,
            kind,
            message,
        });
    }

    /// Appends an informational record.
    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(DiagnosticLevel::Info, kind, message);
    }

    /// Appends a warning record.
    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(DiagnosticLevel::Warning, kind, message);
    }

    /// Appends an error record.
    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(DiagnosticLevel::Error, kind, message);
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Records of the given kind, in insertion order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |record| record.kind == kind)
    }

    /// Whether any record of the given kind was pushed.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.of_kind(kind).next().is_some()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was pushed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes and returns all records.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_insertion_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticKind::Exclusion, "Exclude submission: a.txt");
        diagnostics.warning(DiagnosticKind::Deprecation, "deprecated");
        diagnostics.error(DiagnosticKind::FileCopy, "copy failed");

        let kinds: Vec<_> = diagnostics.records().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::Exclusion,
                DiagnosticKind::Deprecation,
                DiagnosticKind::FileCopy
            ]
        );
        assert_eq!(diagnostics.records()[2].level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_drain_empties_sink() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticKind::Basecode, "Basecode directory \"base\" will be used.");
        assert!(diagnostics.contains(DiagnosticKind::Basecode));

        let drained = diagnostics.drain();
        assert_eq!(drained.len(), 1);
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.contains(DiagnosticKind::Basecode));
    }
}
