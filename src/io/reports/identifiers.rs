//! Stable report identifiers for submissions.

use indexmap::IndexMap;

use crate::discovery::{Submission, SubmissionSet};

/// Maps submission display names to the identifiers used inside a report.
///
/// Identifiers are sequential decimal strings assigned in submission-set
/// order: regular submissions first, then the basecode. A name that occurs
/// twice keeps its first identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionIdMap {
    ids: IndexMap<String, String>,
}

impl SubmissionIdMap {
    /// Assign identifiers to every submission in the set.
    pub fn from_submission_set(set: &SubmissionSet) -> Self {
        let mut ids = IndexMap::new();
        for submission in set.iter() {
            let next = ids.len().to_string();
            ids.entry(submission.name().to_string()).or_insert(next);
        }
        Self { ids }
    }

    /// Identifier of a submission, by its display name.
    pub fn id_of(&self, submission: &Submission) -> Option<&str> {
        self.id_of_name(submission.name())
    }

    /// Identifier for a display name.
    pub fn id_of_name(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    /// Identifier to display name, in assignment order.
    pub fn id_to_name(&self) -> IndexMap<String, String> {
        self.ids
            .iter()
            .map(|(name, id)| (id.clone(), name.clone()))
            .collect()
    }

    /// Number of mapped submissions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no submission is mapped.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
