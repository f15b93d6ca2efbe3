//! Basecode resolution strategies.
//!
//! The configured basecode value is interpreted by an ordered list of
//! strategies. Each strategy either resolves a submission, declares itself
//! not applicable, or fails; the first resolution wins.

use std::path::{is_separator, Path};

use indexmap::IndexMap;
use tracing::debug;

use super::set_builder::SubmissionFactory;
use super::submission::Submission;
use crate::core::errors::{CribError, Result};

/// How a basecode value was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasecodeOrigin {
    /// A path relative to the working directory (or absolute).
    ExplicitPath,
    /// The name of an entry in the submission root (deprecated form).
    RootEntry,
}

/// Outcome of a single strategy.
#[derive(Debug)]
pub enum Resolution {
    /// The strategy produced the basecode submission.
    Resolved(Submission),
    /// The value cannot be interpreted by this strategy.
    NotApplicable,
}

/// Everything a strategy may consult while resolving.
pub struct BasecodeRequest<'a> {
    /// The configured basecode value, verbatim.
    pub configured: &'a str,
    /// Submissions found in the root directory, keyed by entry name.
    pub discovered: &'a IndexMap<String, Submission>,
    /// Builder for submissions outside the root directory.
    pub factory: &'a SubmissionFactory,
}

/// One way of interpreting the configured basecode value.
pub trait BasecodeStrategy {
    /// The interpretation this strategy applies.
    fn origin(&self) -> BasecodeOrigin;

    /// Try to resolve the basecode submission.
    fn resolve(&self, request: &BasecodeRequest<'_>) -> Result<Resolution>;
}

/// Treats the value as a filesystem path.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitPathStrategy;

impl BasecodeStrategy for ExplicitPathStrategy {
    fn origin(&self) -> BasecodeOrigin {
        BasecodeOrigin::ExplicitPath
    }

    fn resolve(&self, request: &BasecodeRequest<'_>) -> Result<Resolution> {
        let path = Path::new(request.configured);
        if !path.exists() {
            debug!("Basecode {} is not an existing path", path.display());
            return Ok(Resolution::NotApplicable);
        }

        if let Some(reason) = request.factory.exclusion_reason(path) {
            return Err(CribError::basecode(reason));
        }

        request
            .factory
            .build(path)
            .map(Resolution::Resolved)
            .map_err(CribError::basecode_from)
    }
}

/// Treats the value as the name of an entry in the submission root.
#[derive(Debug, Default, Clone, Copy)]
pub struct RootSubdirectoryStrategy;

impl BasecodeStrategy for RootSubdirectoryStrategy {
    fn origin(&self) -> BasecodeOrigin {
        BasecodeOrigin::RootEntry
    }

    fn resolve(&self, request: &BasecodeRequest<'_>) -> Result<Resolution> {
        let name = request.configured.trim_matches(is_separator);
        if name.is_empty() || name.contains(is_separator) {
            return Ok(Resolution::NotApplicable);
        }

        if name.contains('.') {
            return Err(CribError::basecode(format!(
                "The basecode directory name \"{name}\" cannot contain dots!"
            )));
        }

        Ok(request
            .discovered
            .get(name)
            .cloned()
            .map_or(Resolution::NotApplicable, Resolution::Resolved))
    }
}

/// The strategies applied by discovery, in order.
pub fn default_strategies() -> Vec<Box<dyn BasecodeStrategy>> {
    vec![
        Box::new(ExplicitPathStrategy),
        Box::new(RootSubdirectoryStrategy),
    ]
}

/// Apply `strategies` in order and return the first resolution.
pub fn resolve_basecode(
    strategies: &[Box<dyn BasecodeStrategy>],
    request: &BasecodeRequest<'_>,
) -> Result<(Submission, BasecodeOrigin)> {
    for strategy in strategies {
        if let Resolution::Resolved(submission) = strategy.resolve(request)? {
            return Ok((submission, strategy.origin()));
        }
    }

    Err(CribError::basecode(format!(
        "Basecode path \"{}\" relative to the working directory could not be found.",
        request.configured
    )))
}
