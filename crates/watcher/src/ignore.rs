//! Ignore set for the watched tree
//!
//! Entries are absolute paths fixed at construction: the root joined with
//! each caller-supplied name. Matching is exact path equality. Descendants
//! of an ignored directory are covered because the registrar never walks
//! into it, so they are never watched in the first place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Immutable set of paths that are never watched or reported
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    paths: Arc<HashSet<PathBuf>>,
}

impl IgnoreSet {
    /// Build the set by joining every name onto `root`
    pub fn new<I, S>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let paths = names
            .into_iter()
            .map(|name| root.join(name.as_ref()))
            .collect();
        Self {
            paths: Arc::new(paths),
        }
    }

    /// Check whether `path` is exactly one of the ignored paths
    pub fn contains(&self, path: &Path) -> bool {
        let ignored = self.paths.contains(path);
        if ignored {
            trace!("Path {:?} is in the ignore set", path);
        }
        ignored
    }

    /// Number of ignored paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if nothing is ignored
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the ignored paths
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}
