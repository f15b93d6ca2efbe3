//! Output Formatting and Display Functions

use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;

use cribcheck_rs::{Diagnostic, DiagnosticLevel, Diagnostics, ReportOutcome, RunOptions, Submission, SubmissionSet};

/// Serializable view of one submission
#[derive(Debug, Serialize)]
pub struct SubmissionSummary {
    pub name: String,
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

impl From<&Submission> for SubmissionSummary {
    fn from(submission: &Submission) -> Self {
        Self {
            name: submission.name().to_string(),
            root: submission.root().to_path_buf(),
            files: submission.files().to_vec(),
        }
    }
}

/// Serializable view of a discovery run
#[derive(Debug, Serialize)]
pub struct SubmissionSetSummary {
    pub root_directory: PathBuf,
    pub submissions: Vec<SubmissionSummary>,
    pub basecode: Option<SubmissionSummary>,
    pub total_files: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl SubmissionSetSummary {
    pub fn new(options: &RunOptions, set: &SubmissionSet, diagnostics: &Diagnostics) -> Self {
        Self {
            root_directory: options.root_directory.clone(),
            submissions: set.submissions().iter().map(SubmissionSummary::from).collect(),
            basecode: set.basecode().map(SubmissionSummary::from),
            total_files: set.total_files(),
            diagnostics: diagnostics.records().to_vec(),
        }
    }
}

/// Print the discovered submissions
pub fn display_submission_set(options: &RunOptions, set: &SubmissionSet) {
    println!(
        "{} {}",
        "Submissions in".bright_blue().bold(),
        options.root_directory.display().to_string().cyan()
    );
    println!();

    for submission in set.submissions() {
        println!(
            "  {:<24} {} file(s)",
            submission.name(),
            submission.files().len().to_string().green()
        );
    }
    if let Some(basecode) = set.basecode() {
        println!(
            "  {:<24} {} file(s) {}",
            basecode.name(),
            basecode.files().len().to_string().green(),
            "[basecode]".yellow()
        );
    }

    println!();
    println!(
        "{} {} submission(s), {} file(s)",
        "Total:".bold(),
        set.number_of_submissions(),
        set.total_files()
    );
    if set.number_of_submissions() < 2 {
        println!(
            "{}",
            "Not enough submissions to compare (need at least 2)".yellow()
        );
    }
}

/// Print warning and error counts from a run
pub fn display_diagnostics_summary(diagnostics: &Diagnostics) {
    let count = |level: DiagnosticLevel| {
        diagnostics
            .records()
            .iter()
            .filter(|record| record.level == level)
            .count()
    };
    let warnings = count(DiagnosticLevel::Warning);
    let errors = count(DiagnosticLevel::Error);
    if warnings + errors > 0 {
        println!(
            "{} {} warning(s), {} error(s)",
            "Diagnostics:".bold(),
            warnings.to_string().yellow(),
            errors.to_string().red()
        );
    }
}

/// Print where the report ended up
pub fn display_report_outcome(outcome: &ReportOutcome) {
    match outcome {
        ReportOutcome::Archived(path) => println!(
            "{} {}",
            "Report archive:".bright_green().bold(),
            path.display().to_string().cyan()
        ),
        ReportOutcome::Uncompressed(path) => println!(
            "{} {}",
            "Report directory (not zipped):".yellow().bold(),
            path.display().to_string().cyan()
        ),
        ReportOutcome::Failed => println!("{}", "No report was written".red().bold()),
    }
}
