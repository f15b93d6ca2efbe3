//! Comparison results handed from the comparison stage to report assembly.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::RunOptions;
use crate::core::errors::{CribError, Result};
use crate::discovery::{Submission, SubmissionSet};
use crate::lang::common::LanguageFrontend;

/// Number of buckets in a similarity distribution.
pub const DISTRIBUTION_BUCKETS: usize = 10;

/// A scored pair of submissions.
#[derive(Debug, Clone, Copy)]
pub struct Comparison<'a> {
    first: &'a Submission,
    second: &'a Submission,
    similarity: f64,
    max_similarity: f64,
}

impl<'a> Comparison<'a> {
    /// Create a comparison; similarities are clamped to `[0, 1]`.
    pub fn new(
        first: &'a Submission,
        second: &'a Submission,
        similarity: f64,
        max_similarity: f64,
    ) -> Self {
        Self {
            first,
            second,
            similarity: similarity.clamp(0.0, 1.0),
            max_similarity: max_similarity.clamp(0.0, 1.0),
        }
    }

    /// First submission of the pair.
    pub fn first(&self) -> &'a Submission {
        self.first
    }

    /// Second submission of the pair.
    pub fn second(&self) -> &'a Submission {
        self.second
    }

    /// Average similarity of the pair.
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    /// Maximum similarity of the pair.
    pub fn max_similarity(&self) -> f64 {
        self.max_similarity
    }
}

/// Similarity measures summarized in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMetric {
    /// Average similarity of the two submissions
    Average,
    /// Maximum similarity of the two submissions
    Maximum,
}

impl SimilarityMetric {
    /// Both metrics, in report order.
    pub const ALL: [SimilarityMetric; 2] = [SimilarityMetric::Average, SimilarityMetric::Maximum];

    /// Short identifier written into the report.
    pub fn identifier(self) -> &'static str {
        match self {
            SimilarityMetric::Average => "AVG",
            SimilarityMetric::Maximum => "MAX",
        }
    }

    /// Human-readable description written into the report.
    pub fn description(self) -> &'static str {
        match self {
            SimilarityMetric::Average => {
                "Average of similarity of both submissions, relative to their size."
            }
            SimilarityMetric::Maximum => {
                "Maximum of similarity of both submissions, relative to the smaller one."
            }
        }
    }

    /// The metric's value for a comparison.
    pub fn value(self, comparison: &Comparison<'_>) -> f64 {
        match self {
            SimilarityMetric::Average => comparison.similarity(),
            SimilarityMetric::Maximum => comparison.max_similarity(),
        }
    }
}

/// Everything report assembly needs from a finished comparison run.
#[derive(Debug)]
pub struct ComparisonResult<'a> {
    submissions: &'a SubmissionSet,
    comparisons: Vec<Comparison<'a>>,
    options: &'a RunOptions,
    language: Arc<dyn LanguageFrontend>,
    duration: Duration,
}

impl<'a> ComparisonResult<'a> {
    /// Create a result using the options' language.
    pub fn new(
        submissions: &'a SubmissionSet,
        comparisons: Vec<Comparison<'a>>,
        options: &'a RunOptions,
        duration: Duration,
    ) -> Result<Self> {
        let language = options.frontend()?;
        Ok(Self::with_language(
            submissions,
            comparisons,
            options,
            language,
            duration,
        ))
    }

    /// Create a result with an explicit language frontend.
    pub fn with_language(
        submissions: &'a SubmissionSet,
        comparisons: Vec<Comparison<'a>>,
        options: &'a RunOptions,
        language: Arc<dyn LanguageFrontend>,
        duration: Duration,
    ) -> Self {
        Self {
            submissions,
            comparisons,
            options,
            language,
            duration,
        }
    }

    /// The discovered submissions.
    pub fn submissions(&self) -> &'a SubmissionSet {
        self.submissions
    }

    /// Every comparison, in the order they were produced.
    pub fn comparisons(&self) -> &[Comparison<'a>] {
        &self.comparisons
    }

    /// The run options.
    pub fn options(&self) -> &'a RunOptions {
        self.options
    }

    /// Language frontend used for view-file handling and naming.
    pub fn language(&self) -> &Arc<dyn LanguageFrontend> {
        &self.language
    }

    /// Wall time of the comparison stage.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Comparisons sorted by average similarity (descending), capped at
    /// `maximum_comparisons`. A cap of zero keeps every comparison.
    pub fn retained_comparisons(&self) -> Vec<Comparison<'a>> {
        let mut sorted = self.comparisons.clone();
        sorted.sort_by(|a, b| b.similarity().total_cmp(&a.similarity()));
        let cap = self.options.maximum_comparisons;
        if cap > 0 {
            sorted.truncate(cap);
        }
        sorted
    }

    /// Histogram of `metric` over all comparisons, highest bucket first.
    ///
    /// Bucket `i` from the end counts values in `[i/10, (i+1)/10)`; a value of
    /// exactly 1.0 lands in the top bucket.
    pub fn similarity_distribution(&self, metric: SimilarityMetric) -> Vec<u32> {
        let mut buckets = vec![0u32; DISTRIBUTION_BUCKETS];
        for comparison in &self.comparisons {
            let scaled = (metric.value(comparison) * DISTRIBUTION_BUCKETS as f64) as usize;
            let index = scaled.min(DISTRIBUTION_BUCKETS - 1);
            buckets[index] += 1;
        }
        buckets.reverse();
        buckets
    }
}

/// A comparison as produced by an external comparison stage, naming submissions by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Name of the first submission
    pub first: String,
    /// Name of the second submission
    pub second: String,
    /// Average similarity in `[0, 1]`
    pub similarity: f64,
    /// Maximum similarity in `[0, 1]`; defaults to the average similarity
    #[serde(default)]
    pub max_similarity: Option<f64>,
}

impl ComparisonRecord {
    /// Resolve the named submissions against a discovered set.
    pub fn resolve<'a>(&self, set: &'a SubmissionSet) -> Result<Comparison<'a>> {
        let lookup = |name: &str| {
            set.submission_by_name(name).ok_or_else(|| {
                CribError::validation_field(
                    format!("Comparison references unknown submission '{name}'"),
                    "comparisons",
                )
            })
        };
        for value in [Some(self.similarity), self.max_similarity].into_iter().flatten() {
            if !(0.0..=1.0).contains(&value) {
                return Err(CribError::validation_field(
                    format!(
                        "Similarity {value} of {} and {} is outside [0, 1]",
                        self.first, self.second
                    ),
                    "comparisons",
                ));
            }
        }

        Ok(Comparison::new(
            lookup(&self.first)?,
            lookup(&self.second)?,
            self.similarity,
            self.max_similarity.unwrap_or(self.similarity),
        ))
    }
}

/// Read a JSON list of [`ComparisonRecord`]s.
pub fn load_comparison_records(path: &Path) -> Result<Vec<ComparisonRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CribError::io(
            format!("Failed to read comparisons file: {}", path.display()),
            e,
        )
    })?;
    serde_json::from_str(&content).map_err(Into::into)
}

/// Resolve every record against the set, failing on the first invalid one.
pub fn resolve_comparisons<'a>(
    records: &[ComparisonRecord],
    set: &'a SubmissionSet,
) -> Result<Vec<Comparison<'a>>> {
    records.iter().map(|record| record.resolve(set)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::registry::frontend_for;

    fn set(names: &[&str]) -> SubmissionSet {
        let java = frontend_for("java").unwrap();
        SubmissionSet::new(
            names
                .iter()
                .map(|name| Submission::new(*name, format!("/subs/{name}"), Vec::new(), java.clone()))
                .collect(),
            None,
        )
    }

    #[test]
    fn test_retained_comparisons_are_sorted_and_capped() {
        let set = set(&["a", "b", "c"]);
        let s = set.submissions();
        let comparisons = vec![
            Comparison::new(&s[0], &s[1], 0.2, 0.3),
            Comparison::new(&s[0], &s[2], 0.9, 0.9),
            Comparison::new(&s[1], &s[2], 0.5, 0.7),
        ];

        let options = RunOptions::default().with_maximum_comparisons(2);
        let result = ComparisonResult::new(&set, comparisons.clone(), &options, Duration::ZERO).unwrap();
        let retained: Vec<f64> = result.retained_comparisons().iter().map(|c| c.similarity()).collect();
        assert_eq!(retained, vec![0.9, 0.5]);

        let unlimited = RunOptions::default().with_maximum_comparisons(0);
        let result = ComparisonResult::new(&set, comparisons, &unlimited, Duration::ZERO).unwrap();
        assert_eq!(result.retained_comparisons().len(), 3);
    }

    #[test]
    fn test_distribution_is_highest_bucket_first() {
        let set = set(&["a", "b", "c"]);
        let s = set.submissions();
        let comparisons = vec![
            Comparison::new(&s[0], &s[1], 1.0, 1.0),
            Comparison::new(&s[0], &s[2], 0.05, 0.95),
            Comparison::new(&s[1], &s[2], 0.55, 0.55),
        ];
        let options = RunOptions::default().with_maximum_comparisons(1);
        let result = ComparisonResult::new(&set, comparisons, &options, Duration::ZERO).unwrap();

        let avg = result.similarity_distribution(SimilarityMetric::Average);
        assert_eq!(avg, vec![1, 0, 0, 0, 1, 0, 0, 0, 0, 1]);
        let max = result.similarity_distribution(SimilarityMetric::Maximum);
        assert_eq!(max, vec![2, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(avg.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_records_resolve_by_name() {
        let set = set(&["alice", "bob"]);
        let record: ComparisonRecord =
            serde_json::from_str(r#"{"first":"alice","second":"bob","similarity":0.4}"#).unwrap();
        let comparison = record.resolve(&set).unwrap();
        assert_eq!(comparison.first().name(), "alice");
        assert_eq!(comparison.max_similarity(), 0.4);

        let unknown = ComparisonRecord {
            first: "alice".into(),
            second: "carol".into(),
            similarity: 0.1,
            max_similarity: None,
        };
        assert!(matches!(unknown.resolve(&set), Err(CribError::Validation { .. })));

        let out_of_range = ComparisonRecord {
            similarity: 1.5,
            ..unknown
        };
        assert!(out_of_range.resolve(&set).is_err());
    }
}
