//! # Cribcheck-RS: Submission Discovery and Similarity Reports
//!
//! The front and back ends of a source-similarity checker:
//!
//! - **Discovery**: turn a directory of student submissions into a validated
//!   [`SubmissionSet`], honoring exclusion patterns, accepted suffixes, a
//!   per-submission subdirectory and an optional basecode submission.
//! - **Reports**: take scored comparisons, copy the involved sources, write
//!   per-comparison details and an `overview.json` with summary metrics, and
//!   package everything as a zip archive.
//!
//! Tokenizing and comparing submissions is out of scope; comparison results
//! are supplied by the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        API Layer                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  Core         │  Discovery      │  Language  │  I/O      │
//! │ • Config      │ • Filters/Walk  │ • Registry │ • Reports │
//! │ • Errors      │ • Basecode      │            │ • Archive │
//! │ • Diagnostics │ • Set builder   │            │           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use cribcheck_rs::{discover, ComparisonResult, Diagnostics, ReportAssembler, RunOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = RunOptions::new("submissions").with_suffixes([".java"]);
//!     let mut diagnostics = Diagnostics::new();
//!     let set = discover(Path::new("submissions"), &options, &options.exclusion_set()?, &mut diagnostics)?;
//!
//!     let result = ComparisonResult::new(&set, Vec::new(), &options, Duration::ZERO)?;
//!     let outcome = ReportAssembler::new().assemble(&result, Path::new("report"), &mut diagnostics);
//!     println!("{} submissions, report: {:?}", set.number_of_submissions(), outcome);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Configuration, errors and diagnostics
pub mod core {
    //! Configuration, error types and the diagnostics sink.

    pub mod config;
    pub mod diagnostics;
    pub mod errors;
}

// Submission discovery
pub mod discovery;

// Language frontends
pub mod lang;

// Report output
pub mod io {
    //! Report assembly and packaging.

    pub mod reports;
}

// Public API types
pub mod api {
    //! Comparison results consumed by report assembly.

    pub mod results;
}

// Re-export primary types for convenience
pub use api::results::{Comparison, ComparisonRecord, ComparisonResult, SimilarityMetric};
pub use core::config::RunOptions;
pub use core::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLevel, Diagnostics};
pub use core::errors::{CribError, Result, ResultExt};
pub use discovery::{discover, Submission, SubmissionSet, SubmissionSetBuilder};
pub use io::reports::{ReportAssembler, ReportOutcome};
pub use lang::LanguageFrontend;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
