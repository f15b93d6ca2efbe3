//! The `overview.json` document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::metrics::Metric;

/// Name of the overview document inside the report.
pub const OVERVIEW_FILE_NAME: &str = "overview.json";

/// Report format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Version of the report layout produced by this crate.
pub const REPORT_VERSION: Version = Version {
    major: 4,
    minor: 0,
    patch: 0,
};

/// Top-level summary of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub report_version: Version,
    pub submission_folder_path: Vec<String>,
    /// Basecode folder name, empty without basecode
    pub base_code_folder_path: String,
    pub language: String,
    pub file_extensions: Vec<String>,
    pub submission_id_to_display_name: IndexMap<String, String>,
    /// First id to second id to comparison file, recorded in both directions
    pub submission_ids_to_comparison_file_name: IndexMap<String, IndexMap<String, String>>,
    pub failed_submission_names: Vec<String>,
    pub excluded_files: Vec<String>,
    pub match_sensitivity: u32,
    /// `dd/mm/yy`
    pub date_of_execution: String,
    /// Milliseconds
    pub execution_time: u64,
    pub metrics: Vec<Metric>,
    pub clusters: Vec<serde_json::Value>,
}

/// Today's date in the overview's `dd/mm/yy` format.
pub fn execution_date() -> String {
    chrono::Local::now().format("%d/%m/%y").to_string()
}
