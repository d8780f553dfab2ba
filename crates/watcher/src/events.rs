//! Change notification and batch types
//!
//! [`RawEvent`] is the single path-level notification an event source
//! reports. [`Batch`] is what the engine hands to its consumer once per
//! coalescing window.

use bitflags::bitflags;
use notify::event::{EventKind, ModifyKind, RenameMode};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

bitflags! {
    /// Kinds of change carried by one notification
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Op: u8 {
        const CREATE = 1 << 0;
        const WRITE = 1 << 1;
        const REMOVE = 1 << 2;
        const RENAME = 1 << 3;
        const CHMOD = 1 << 4;
    }
}

impl Op {
    /// True when nothing but an attribute change is set
    ///
    /// Metadata indexers churn attributes without touching content, so
    /// these notifications never open a window.
    pub fn is_attribute_only(self) -> bool {
        self.difference(Op::CHMOD).is_empty()
    }

    /// Map a notify event kind onto an operation set
    ///
    /// Returns `None` for kinds that carry no change at all (access, unknown).
    /// The destination side of a move counts as a creation: a directory
    /// moved into place has to be registered like a freshly made one.
    pub fn from_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Op::CREATE),
            EventKind::Modify(ModifyKind::Metadata(_)) => Some(Op::CHMOD),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(Op::CREATE),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Op::RENAME),
            EventKind::Modify(_) => Some(Op::WRITE),
            EventKind::Remove(_) => Some(Op::REMOVE),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }
}

/// A single path-level change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Path that changed
    pub path: PathBuf,
    /// What happened to it
    pub op: Op,
}

impl RawEvent {
    /// Create a new raw event
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    /// Split a notify event into one raw event per affected path
    ///
    /// A paired rename carries `[from, to]`; the old name is a RENAME and
    /// the new one a CREATE.
    pub fn from_notify(event: notify::Event) -> Vec<Self> {
        let Some(op) = Op::from_kind(&event.kind) else {
            return Vec::new();
        };

        if event.kind == EventKind::Modify(ModifyKind::Name(RenameMode::Both)) {
            return event
                .paths
                .into_iter()
                .enumerate()
                .map(|(i, path)| {
                    let op = if i == 0 { Op::RENAME } else { Op::CREATE };
                    Self::new(path, op)
                })
                .collect();
        }

        event
            .paths
            .into_iter()
            .map(|path| Self::new(path, op))
            .collect()
    }

    /// Whether this notification reports a creation
    pub fn is_create(&self) -> bool {
        self.op.contains(Op::CREATE)
    }
}

/// Distinct paths changed during one coalescing window, sorted ascending
///
/// Ordering compares the raw path bytes, so `a.txt` sorts before `a/b`
/// the same way the plain strings would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch(Vec<PathBuf>);

impl Batch {
    /// Consume a window's seen set into a sorted batch
    pub fn from_seen(seen: HashSet<PathBuf>) -> Self {
        let mut paths: Vec<PathBuf> = seen.into_iter().collect();
        paths.sort_unstable_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Self(paths)
    }

    /// Paths in this batch
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Iterate over the paths
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the paths
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.0
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", path.display())?;
        }
        f.write_str("]")
    }
}

impl Serialize for Batch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|p| p.to_string_lossy()))
    }
}

impl IntoIterator for Batch {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
