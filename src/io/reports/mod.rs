//! Report assembly and packaging.

pub mod archive;
mod assembler;
pub mod comparison_writer;
mod error;
pub mod identifiers;
pub mod metrics;
pub mod overview;

pub use assembler::{ReportAssembler, ReportOutcome, SUBMISSIONS_FOLDER};
pub use comparison_writer::{ComparisonDetail, ComparisonDetailWriter, JsonComparisonWriter};
pub use error::ReportError;
pub use identifiers::SubmissionIdMap;
pub use metrics::{Metric, TopComparison};
pub use overview::{OverviewReport, Version, OVERVIEW_FILE_NAME, REPORT_VERSION};
