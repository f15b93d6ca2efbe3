//! CLI Argument Structures
//!
//! Command and argument definitions for the cribcheck binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Submission discovery and similarity report assembly
#[derive(Parser)]
#[command(name = "cribcheck")]
#[command(version = VERSION)]
#[command(about = "Cribcheck - submission discovery and similarity reports")]
#[command(long_about = "
Discover student submissions below a root directory and package comparison
results into a report archive.

Common Usage:

  # List the submissions found below ./submissions
  cribcheck discover ./submissions --suffix .java

  # Use a basecode directory outside the submission root
  cribcheck discover ./submissions --basecode ./template

  # Build a report from comparison results
  cribcheck report ./submissions --comparisons scores.json --out ./report

  # List supported languages
  cribcheck list-languages
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover submissions and print the resulting set
    Discover(DiscoverArgs),

    /// Discover submissions and assemble a report from comparison results
    Report(ReportArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// List supported languages and their default suffixes
    #[command(name = "list-languages")]
    ListLanguages,
}

/// Options shared by every command that runs discovery
#[derive(Args, Debug, Clone, Default)]
pub struct DiscoveryArgs {
    /// Root directory containing one entry per submission
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to .cribcheck.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Language of the submissions
    #[arg(short, long)]
    pub language: Option<String>,

    /// Accepted file suffix (repeatable); defaults to the language's suffixes
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    /// Basecode path, or the name of a root entry (deprecated)
    #[arg(long)]
    pub basecode: Option<String>,

    /// Subdirectory inside each submission that holds the content
    #[arg(long)]
    pub subdirectory: Option<String>,

    /// Excluded name pattern (repeatable, trailing match)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excluded: Vec<String>,

    /// File with one exclusion pattern per line
    #[arg(long)]
    pub exclusion_file: Option<PathBuf>,

    /// Additional submission root listed in the report overview (repeatable)
    #[arg(long = "old-root", value_name = "DIR")]
    pub legacy_roots: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// JSON list of comparisons: {first, second, similarity, max_similarity}
    #[arg(long)]
    pub comparisons: PathBuf,

    /// Report directory; the archive is written next to it as <out>.zip
    #[arg(short, long, default_value = "result")]
    pub out: PathBuf,

    /// Maximum number of comparisons kept in the report (0 keeps all)
    #[arg(long)]
    pub max_comparisons: Option<usize>,

    /// Minimum token match recorded in the overview
    #[arg(long)]
    pub match_sensitivity: Option<u32>,

    /// Duration of the comparison stage in milliseconds
    #[arg(long, default_value_t = 0)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable summary
    Human,
    /// Machine-readable JSON
    Json,
}
