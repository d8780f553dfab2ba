//! Recursive directory registration
//!
//! Walks a subtree depth-first and registers every directory that is not
//! ignored. Ignored directories are pruned, so nothing beneath them is
//! ever registered. Files are covered by their parent's watch.
//!
//! Directories created while the walk is running may be missed; the
//! filter re-registers on every creation notification, which narrows
//! that window without closing it.

use crate::ignore::IgnoreSet;
use crate::logger::WatchLogger;
use crate::source::EventSource;
use fswatch_core::error::{Error, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Register `root` and every non-ignored directory beneath it
///
/// Returns how many directories were registered. The first traversal or
/// registration error aborts the walk; nothing is retried.
pub fn register_tree<S>(
    source: &mut S,
    ignore: &IgnoreSet,
    root: &Path,
    logger: &dyn WatchLogger,
) -> Result<usize>
where
    S: EventSource + ?Sized,
{
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.file_type().is_dir() && !ignore.contains(entry.path()));

    let mut registered = 0;
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        source.add_dir(entry.path())?;
        logger.dir_registered(entry.path());
        registered += 1;
    }

    Ok(registered)
}

fn walk_error(err: walkdir::Error) -> Error {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    Error::walk(path, err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopLogger;
    use crate::source::testing::fake_source;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sorted(mut dirs: Vec<PathBuf>) -> Vec<PathBuf> {
        dirs.sort();
        dirs
    }

    #[test]
    fn test_registers_every_directory() {
        let temp_dir = TempDir::new().expect("test setup failed");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).expect("test setup failed");
        fs::create_dir_all(root.join("d")).expect("test setup failed");
        fs::write(root.join("a/file.txt"), "x").expect("test setup failed");

        let (mut source, _streams, mut handles) = fake_source(None);
        let count = register_tree(&mut source, &IgnoreSet::default(), root, &NoopLogger)
            .expect("walk should succeed");

        assert_eq!(count, 5);
        assert_eq!(
            sorted(handles.registered()),
            sorted(vec![
                root.to_path_buf(),
                root.join("a"),
                root.join("a/b"),
                root.join("a/b/c"),
                root.join("d"),
            ])
        );
    }

    #[test]
    fn test_prunes_ignored_subtrees() {
        let temp_dir = TempDir::new().expect("test setup failed");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/deep/deeper")).expect("test setup failed");
        fs::create_dir_all(root.join("keep/sub")).expect("test setup failed");

        let ignore = IgnoreSet::new(root, ["sub"]);
        let (mut source, _streams, mut handles) = fake_source(None);
        register_tree(&mut source, &ignore, root, &NoopLogger).expect("walk should succeed");

        let registered = handles.registered();
        assert!(!registered.iter().any(|p| p.starts_with(root.join("sub"))));
        // Exact match only: a nested directory with the same name is watched
        assert!(registered.contains(&root.join("keep/sub")));
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let temp_dir = TempDir::new().expect("test setup failed");
        let missing = temp_dir.path().join("gone");

        let (mut source, _streams, mut handles) = fake_source(None);
        let err = register_tree(&mut source, &IgnoreSet::default(), &missing, &NoopLogger)
            .unwrap_err();

        assert!(matches!(err, Error::Walk { .. }));
        assert!(handles.registered().is_empty());
    }

    #[test]
    fn test_registration_failure_aborts() {
        let temp_dir = TempDir::new().expect("test setup failed");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("bad")).expect("test setup failed");

        let (mut source, _streams, _handles) = fake_source(Some(root.join("bad")));
        let err = register_tree(&mut source, &IgnoreSet::default(), root, &NoopLogger)
            .unwrap_err();

        assert!(err.to_string().contains("cannot watch"));
    }
}
