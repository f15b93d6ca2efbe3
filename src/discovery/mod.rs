//! Submission discovery.
//!
//! Discovery reads the immediate entries of a root directory, turns each
//! acceptable entry into a [`Submission`], resolves the optional basecode and
//! returns a [`SubmissionSet`].

pub mod basecode;
pub mod exclusions;
pub mod filters;
pub mod set_builder;
pub mod submission;
pub mod walk;

pub use basecode::{
    BasecodeOrigin, BasecodeRequest, BasecodeStrategy, ExplicitPathStrategy, Resolution,
    RootSubdirectoryStrategy,
};
pub use exclusions::load_exclusion_file;
pub use filters::EntryFilter;
pub use set_builder::{discover, SubmissionFactory, SubmissionSetBuilder};
pub use submission::{Submission, SubmissionSet};
pub use walk::collect_files;
