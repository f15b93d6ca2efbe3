//! Summary metrics written into the report overview.

use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::identifiers::SubmissionIdMap;
use crate::api::results::{Comparison, ComparisonResult, SimilarityMetric};

/// One metric's distribution and leading comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub description: String,
    /// Counts per tenth of the similarity range, highest bucket first
    pub distribution: Vec<u32>,
    pub top_comparisons: Vec<TopComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopComparison {
    pub first_submission: String,
    pub second_submission: String,
    pub similarity: f64,
}

/// Build a metric from the full result and its retained comparisons.
///
/// The distribution covers every comparison; the top list only the retained
/// ones, ordered by this metric's value.
pub fn build_metric(
    metric: SimilarityMetric,
    result: &ComparisonResult<'_>,
    retained: &[Comparison<'_>],
    ids: &SubmissionIdMap,
) -> Result<Metric, ReportError> {
    let mut ordered: Vec<&Comparison<'_>> = retained.iter().collect();
    ordered.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));

    let top_comparisons = ordered
        .into_iter()
        .map(|comparison| -> Result<TopComparison, ReportError> {
            Ok(TopComparison {
                first_submission: identifier(ids, comparison, true)?,
                second_submission: identifier(ids, comparison, false)?,
                similarity: metric.value(comparison),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Metric {
        name: metric.identifier().to_string(),
        description: metric.description().to_string(),
        distribution: result.similarity_distribution(metric),
        top_comparisons,
    })
}

fn identifier(
    ids: &SubmissionIdMap,
    comparison: &Comparison<'_>,
    first: bool,
) -> Result<String, ReportError> {
    let submission = if first {
        comparison.first()
    } else {
        comparison.second()
    };
    ids.id_of(submission)
        .map(str::to_string)
        .ok_or_else(|| ReportError::UnknownSubmission(submission.name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RunOptions;
    use crate::discovery::{Submission, SubmissionSet};
    use crate::lang::registry::frontend_for;
    use std::time::Duration;

    #[test]
    fn test_max_metric_orders_top_comparisons_by_maximum() {
        let java = frontend_for("java").unwrap();
        let make = |name: &str| Submission::new(name, format!("/c/{name}"), Vec::new(), java.clone());
        let set = SubmissionSet::new(vec![make("a"), make("b"), make("c")], None);
        let s = set.submissions();
        let comparisons = vec![
            Comparison::new(&s[0], &s[1], 0.6, 0.6),
            Comparison::new(&s[0], &s[2], 0.4, 0.8),
        ];
        let options = RunOptions::default();
        let result = ComparisonResult::new(&set, comparisons, &options, Duration::ZERO).unwrap();
        let retained = result.retained_comparisons();
        let ids = SubmissionIdMap::from_submission_set(&set);

        let avg = build_metric(SimilarityMetric::Average, &result, &retained, &ids).unwrap();
        assert_eq!(avg.name, "AVG");
        assert_eq!(avg.top_comparisons[0].second_submission, "1");

        let max = build_metric(SimilarityMetric::Maximum, &result, &retained, &ids).unwrap();
        assert_eq!(max.name, "MAX");
        assert_eq!(max.top_comparisons[0].second_submission, "2");
        assert_eq!(max.top_comparisons[0].similarity, 0.8);
        assert_eq!(max.distribution.len(), 10);
    }
}
