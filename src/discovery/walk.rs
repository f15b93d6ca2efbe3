//! Content file collection below a submission root.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::filters::EntryFilter;

/// Collect every accepted file below `root`, in sorted depth-first order.
///
/// The exclusion test is applied at every level, so an excluded directory
/// contributes no files at all. Entries that cannot be listed (unreadable
/// directories, files with a rejected suffix) contribute nothing and are not
/// treated as errors. A file root with an accepted suffix yields itself.
///
/// Traversal uses an explicit work stack; symlinked directories are entered
/// at most once per canonical location.
pub fn collect_files(root: &Path, filter: &EntryFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if filter.is_excluded(&path) {
            debug!("Skipping excluded path {}", path.display());
            continue;
        }

        if filter.is_accepted_file(&path) {
            files.push(path);
            continue;
        }

        if !path.is_dir() {
            continue;
        }

        if let Ok(canonical) = fs::canonicalize(&path) {
            if !visited.insert(canonical) {
                debug!("Skipping already visited directory {}", path.display());
                continue;
            }
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("Cannot list {}: {}", path.display(), err);
                continue;
            }
        };

        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        children.sort();
        stack.extend(children.into_iter().rev());
    }

    files
}
