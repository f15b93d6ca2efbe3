//! Report assembly: copy sources, write comparison details and the overview, then package.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use super::archive::zip_directory;
use super::comparison_writer::{ComparisonDetailWriter, JsonComparisonWriter};
use super::error::ReportError;
use super::identifiers::SubmissionIdMap;
use super::metrics::build_metric;
use super::overview::{execution_date, OverviewReport, OVERVIEW_FILE_NAME, REPORT_VERSION};
use crate::api::results::{Comparison, ComparisonResult, SimilarityMetric};
use crate::core::diagnostics::{DiagnosticKind, Diagnostics};
use crate::discovery::Submission;

/// Directory inside the report holding the copied submission files.
pub const SUBMISSIONS_FOLDER: &str = "submissions";

/// Where the finished report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The report was packaged; the uncompressed directory is gone.
    Archived(PathBuf),
    /// Packaging failed; the report directory is left in place.
    Uncompressed(PathBuf),
    /// The output directory could not be created; nothing was written.
    Failed,
}

impl ReportOutcome {
    /// Location of the produced report, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ReportOutcome::Archived(path) | ReportOutcome::Uncompressed(path) => Some(path),
            ReportOutcome::Failed => None,
        }
    }
}

/// Builds report directories from comparison results.
pub struct ReportAssembler {
    detail_writer: Box<dyn ComparisonDetailWriter>,
}

/// Default implementation for [`ReportAssembler`].
impl Default for ReportAssembler {
    fn default() -> Self {
        Self {
            detail_writer: Box::new(JsonComparisonWriter),
        }
    }
}

impl ReportAssembler {
    /// Assembler using [`JsonComparisonWriter`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the comparison detail writer.
    pub fn with_detail_writer(mut self, writer: Box<dyn ComparisonDetailWriter>) -> Self {
        self.detail_writer = writer;
        self
    }

    /// Write the report for `result` to `output`, then package it as `<output>.zip`.
    ///
    /// Only a failure to create `output` itself ends the run early. Every other
    /// failure is recorded in `diagnostics` and the remaining steps still run.
    pub fn assemble(
        &self,
        result: &ComparisonResult<'_>,
        output: &Path,
        diagnostics: &mut Diagnostics,
    ) -> ReportOutcome {
        info!("Start writing report files...");
        if let Err(err) = fs::create_dir_all(output) {
            diagnostics.error(
                DiagnosticKind::DirectoryCreation,
                format!(
                    "Could not create directory {} for report generation: {}",
                    output.display(),
                    err
                ),
            );
            return ReportOutcome::Failed;
        }

        let ids = SubmissionIdMap::from_submission_set(result.submissions());
        let retained = result.retained_comparisons();

        self.copy_submission_files(result, &retained, &ids, output, diagnostics);
        let comparison_files = self.write_comparisons(&retained, &ids, output, diagnostics);
        self.write_overview(result, &retained, &ids, comparison_files, output, diagnostics);

        info!("Zipping report files...");
        match zip_directory(output) {
            Ok(archive) => {
                if let Err(err) = fs::remove_dir_all(output) {
                    diagnostics.warning(
                        DiagnosticKind::Packaging,
                        format!(
                            "Could not delete report directory {} after zipping: {}",
                            output.display(),
                            err
                        ),
                    );
                }
                ReportOutcome::Archived(archive)
            }
            Err(err) => {
                debug!("Zipping {} failed: {}", output.display(), err);
                diagnostics.error(
                    DiagnosticKind::Packaging,
                    format!(
                        "Could not zip results. The results are still available uncompressed at {}",
                        output.display()
                    ),
                );
                ReportOutcome::Uncompressed(output.to_path_buf())
            }
        }
    }

    fn copy_submission_files(
        &self,
        result: &ComparisonResult<'_>,
        retained: &[Comparison<'_>],
        ids: &SubmissionIdMap,
        output: &Path,
        diagnostics: &mut Diagnostics,
    ) {
        let submissions_dir = output.join(SUBMISSIONS_FOLDER);
        if let Err(err) = fs::create_dir_all(&submissions_dir) {
            diagnostics.error(
                DiagnosticKind::DirectoryCreation,
                format!("Could not create directory {}: {}", submissions_dir.display(), err),
            );
            return;
        }

        let mut involved: IndexSet<&Submission> = IndexSet::new();
        for comparison in retained {
            involved.insert(comparison.first());
            involved.insert(comparison.second());
        }

        let language = result.language();
        for submission in involved {
            let Some(id) = ids.id_of(submission) else {
                diagnostics.error(
                    DiagnosticKind::DirectoryCreation,
                    format!("No report identifier for submission {}", submission.name()),
                );
                continue;
            };
            let directory = submissions_dir.join(id);
            if let Err(err) = fs::create_dir_all(&directory) {
                diagnostics.error(
                    DiagnosticKind::DirectoryCreation,
                    format!("Could not create directory {}: {}", directory.display(), err),
                );
                continue;
            }

            for file in submission.files() {
                let source = language.displayed_path(file);
                let Some(file_name) = file.file_name() else {
                    continue;
                };
                if let Err(err) = fs::copy(&source, directory.join(file_name)) {
                    diagnostics.error(
                        DiagnosticKind::FileCopy,
                        format!("Could not save submission file {}: {}", source.display(), err),
                    );
                }
            }
        }
    }

    fn write_comparisons(
        &self,
        retained: &[Comparison<'_>],
        ids: &SubmissionIdMap,
        output: &Path,
        diagnostics: &mut Diagnostics,
    ) -> IndexMap<String, IndexMap<String, String>> {
        let mut files: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        for comparison in retained {
            let file_name = match self.detail_writer.write(comparison, ids, output) {
                Ok(name) => name,
                Err(err) => {
                    diagnostics.error(
                        DiagnosticKind::ComparisonWrite,
                        format!(
                            "Could not write comparison of {} and {}: {}",
                            comparison.first().name(),
                            comparison.second().name(),
                            err
                        ),
                    );
                    continue;
                }
            };

            if let (Some(first), Some(second)) =
                (ids.id_of(comparison.first()), ids.id_of(comparison.second()))
            {
                files
                    .entry(first.to_string())
                    .or_default()
                    .insert(second.to_string(), file_name.clone());
                files
                    .entry(second.to_string())
                    .or_default()
                    .insert(first.to_string(), file_name);
            }
        }
        files
    }

    fn write_overview(
        &self,
        result: &ComparisonResult<'_>,
        retained: &[Comparison<'_>],
        ids: &SubmissionIdMap,
        comparison_files: IndexMap<String, IndexMap<String, String>>,
        output: &Path,
        diagnostics: &mut Diagnostics,
    ) {
        if let Err(err) = build_overview(result, retained, ids, comparison_files)
            .and_then(|overview| write_json(&output.join(OVERVIEW_FILE_NAME), &overview))
        {
            diagnostics.error(
                DiagnosticKind::Overview,
                format!("Could not write {}: {}", OVERVIEW_FILE_NAME, err),
            );
        }
    }
}

fn build_overview(
    result: &ComparisonResult<'_>,
    retained: &[Comparison<'_>],
    ids: &SubmissionIdMap,
    comparison_files: IndexMap<String, IndexMap<String, String>>,
) -> Result<OverviewReport, ReportError> {
    let options = result.options();
    let submission_folder_path = std::iter::once(&options.root_directory)
        .chain(options.legacy_root_directories.iter())
        .map(|path| path.display().to_string())
        .collect();

    let metrics = SimilarityMetric::ALL
        .iter()
        .map(|metric| build_metric(*metric, result, retained, ids))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OverviewReport {
        report_version: REPORT_VERSION,
        submission_folder_path,
        base_code_folder_path: result
            .submissions()
            .basecode()
            .map(|basecode| basecode.name().to_string())
            .unwrap_or_default(),
        language: result.language().display_name().to_string(),
        file_extensions: options.file_suffixes.clone(),
        submission_id_to_display_name: ids.id_to_name(),
        submission_ids_to_comparison_file_name: comparison_files,
        failed_submission_names: Vec::new(),
        excluded_files: options.excluded_files.clone(),
        match_sensitivity: options.match_sensitivity,
        date_of_execution: execution_date(),
        execution_time: u64::try_from(result.duration().as_millis()).unwrap_or(u64::MAX),
        metrics,
        clusters: Vec::new(),
    })
}

fn write_json(path: &Path, overview: &OverviewReport) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(overview)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RunOptions;
    use crate::discovery::SubmissionSet;
    use crate::lang::registry::frontend_for;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    struct FailingWriter;

    impl ComparisonDetailWriter for FailingWriter {
        fn write(
            &self,
            _comparison: &Comparison<'_>,
            _ids: &SubmissionIdMap,
            _output_dir: &Path,
        ) -> Result<String, ReportError> {
            Err(ReportError::Io(std::io::Error::other("disk full")))
        }
    }

    fn fixture(root: &Path) -> SubmissionSet {
        let java = frontend_for("java").unwrap();
        let make = |name: &str| {
            let dir = root.join(name);
            fs::create_dir_all(&dir).unwrap();
            let file = dir.join(format!("{name}.java"));
            fs::write(&file, "class X {}").unwrap();
            Submission::new(name, dir, vec![file], java.clone())
        };
        SubmissionSet::new(vec![make("alice"), make("bob"), make("carol")], None)
    }

    #[test]
    fn test_assemble_archives_report() {
        let dir = tempdir().unwrap();
        let set = fixture(&dir.path().join("subs"));
        let s = set.submissions();
        let comparisons = vec![
            Comparison::new(&s[0], &s[1], 0.9, 0.95),
            Comparison::new(&s[1], &s[2], 0.1, 0.2),
        ];
        let options = RunOptions::default().with_maximum_comparisons(1);
        let result = ComparisonResult::new(&set, comparisons, &options, Duration::from_millis(1500)).unwrap();

        let output = dir.path().join("report");
        let mut diagnostics = Diagnostics::new();
        let outcome = ReportAssembler::new().assemble(&result, &output, &mut diagnostics);

        assert_eq!(outcome, ReportOutcome::Archived(dir.path().join("report.zip")));
        assert!(!output.exists());
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.records());

        let mut zip = zip::ZipArchive::new(File::open(dir.path().join("report.zip")).unwrap()).unwrap();
        assert!(zip.by_name("submissions/0/alice.java").is_ok());
        assert!(zip.by_name("submissions/1/bob.java").is_ok());
        assert!(zip.by_name("submissions/2/carol.java").is_err());
        assert!(zip.by_name("0-1.json").is_ok());

        let overview: OverviewReport =
            serde_json::from_reader(zip.by_name(OVERVIEW_FILE_NAME).unwrap()).unwrap();
        assert_eq!(overview.execution_time, 1500);
        assert_eq!(overview.base_code_folder_path, "");
        assert_eq!(overview.metrics.len(), 2);
        assert_eq!(overview.metrics[0].distribution.iter().sum::<u32>(), 2);
        assert_eq!(overview.metrics[0].top_comparisons.len(), 1);
        assert_eq!(overview.submission_ids_to_comparison_file_name["1"]["0"], "0-1.json");
    }

    #[test]
    fn test_failed_detail_write_is_recorded_and_skipped() {
        let dir = tempdir().unwrap();
        let set = fixture(&dir.path().join("subs"));
        let s = set.submissions();
        let comparisons = vec![Comparison::new(&s[0], &s[1], 0.5, 0.5)];
        let options = RunOptions::default();
        let result = ComparisonResult::new(&set, comparisons, &options, Duration::ZERO).unwrap();

        let output = dir.path().join("report");
        let mut diagnostics = Diagnostics::new();
        let outcome = ReportAssembler::new()
            .with_detail_writer(Box::new(FailingWriter))
            .assemble(&result, &output, &mut diagnostics);

        assert!(matches!(outcome, ReportOutcome::Archived(_)));
        assert_eq!(diagnostics.of_kind(DiagnosticKind::ComparisonWrite).count(), 1);
    }

    #[test]
    fn test_unzippable_report_stays_uncompressed() {
        let dir = tempdir().unwrap();
        let set = fixture(&dir.path().join("subs"));
        let options = RunOptions::default();
        let result = ComparisonResult::new(&set, Vec::new(), &options, Duration::ZERO).unwrap();

        fs::create_dir_all(dir.path().join("report.zip")).unwrap();
        let output = dir.path().join("report");
        let mut diagnostics = Diagnostics::new();
        let outcome = ReportAssembler::new().assemble(&result, &output, &mut diagnostics);

        assert_eq!(outcome, ReportOutcome::Uncompressed(output.clone()));
        assert!(output.join(OVERVIEW_FILE_NAME).is_file());
        assert!(diagnostics.contains(DiagnosticKind::Packaging));
    }

    #[test]
    fn test_uncreatable_output_fails_without_writing() {
        let dir = tempdir().unwrap();
        let set = fixture(&dir.path().join("subs"));
        let options = RunOptions::default();
        let result = ComparisonResult::new(&set, Vec::new(), &options, Duration::ZERO).unwrap();

        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let mut diagnostics = Diagnostics::new();
        let outcome = ReportAssembler::new().assemble(&result, &blocker.join("report"), &mut diagnostics);

        assert_eq!(outcome, ReportOutcome::Failed);
        assert!(outcome.path().is_none());
        assert!(diagnostics.contains(DiagnosticKind::DirectoryCreation));
    }
}
