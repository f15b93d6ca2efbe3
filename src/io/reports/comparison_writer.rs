//! Per-comparison detail files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::identifiers::SubmissionIdMap;
use crate::api::results::Comparison;

/// Writes the detail file for one comparison into the report directory.
pub trait ComparisonDetailWriter {
    /// Write the detail file and return its name relative to `output_dir`.
    fn write(
        &self,
        comparison: &Comparison<'_>,
        ids: &SubmissionIdMap,
        output_dir: &Path,
    ) -> Result<String, ReportError>;
}

/// Content of a `<firstId>-<secondId>.json` detail file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDetail {
    pub first_submission_id: String,
    pub second_submission_id: String,
    pub similarity: f64,
    pub max_similarity: f64,
}

/// Default detail writer producing one pretty-printed JSON file per comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonComparisonWriter;

impl ComparisonDetailWriter for JsonComparisonWriter {
    fn write(
        &self,
        comparison: &Comparison<'_>,
        ids: &SubmissionIdMap,
        output_dir: &Path,
    ) -> Result<String, ReportError> {
        let id = |submission: &crate::discovery::Submission| {
            ids.id_of(submission)
                .map(str::to_string)
                .ok_or_else(|| ReportError::UnknownSubmission(submission.name().to_string()))
        };
        let detail = ComparisonDetail {
            first_submission_id: id(comparison.first())?,
            second_submission_id: id(comparison.second())?,
            similarity: comparison.similarity(),
            max_similarity: comparison.max_similarity(),
        };

        let file_name = format!(
            "{}-{}.json",
            detail.first_submission_id, detail.second_submission_id
        );
        let json = serde_json::to_string_pretty(&detail)?;
        fs::write(output_dir.join(&file_name), json)?;
        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{Submission, SubmissionSet};
    use crate::lang::registry::frontend_for;
    use tempfile::tempdir;

    #[test]
    fn test_writes_named_detail_file() {
        let java = frontend_for("java").unwrap();
        let make = |name: &str| Submission::new(name, format!("/c/{name}"), Vec::new(), java.clone());
        let set = SubmissionSet::new(vec![make("alice"), make("bob")], None);
        let ids = SubmissionIdMap::from_submission_set(&set);
        let s = set.submissions();
        let comparison = Comparison::new(&s[1], &s[0], 0.25, 0.5);

        let dir = tempdir().unwrap();
        let name = JsonComparisonWriter.write(&comparison, &ids, dir.path()).unwrap();
        assert_eq!(name, "1-0.json");

        let content = fs::read_to_string(dir.path().join(&name)).unwrap();
        let detail: ComparisonDetail = serde_json::from_str(&content).unwrap();
        assert_eq!(detail.first_submission_id, "1");
        assert_eq!(detail.max_similarity, 0.5);
    }
}
