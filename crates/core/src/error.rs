use std::path::PathBuf;
use thiserror::Error;

/// Result type for fswatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fswatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File watching errors raised by the engine itself
    #[error("Watcher error: {0}")]
    Watcher(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Directory traversal failed while registering a tree
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reported by the underlying event source, passed through as-is
    #[error(transparent)]
    Source(Box<dyn std::error::Error + Send + Sync>),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a watcher error
    pub fn watcher(msg: impl Into<String>) -> Self {
        Self::Watcher(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a traversal error for `path`
    pub fn walk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }

    /// Wraps an event source error without altering its message
    pub fn source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(source))
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("queue overflow")]
    struct Overflow;

    #[test]
    fn test_source_error_is_transparent() {
        let err = Error::source(Overflow);
        assert_eq!(err.to_string(), "queue overflow");
    }

    #[test]
    fn test_walk_error_names_path() {
        let err = Error::walk(
            "/tmp/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Failed to walk /tmp/missing: gone");
    }

    #[test]
    fn test_result_context() {
        let res: std::result::Result<(), Overflow> = Err(Overflow);
        let err = res.context("draining events").unwrap_err();
        assert_eq!(err.to_string(), "draining events: queue overflow");
    }

    #[test]
    fn test_context_wraps_crate_errors() {
        let res: Result<usize> = Err(Error::watcher("cannot watch /r/new"));
        let err = res.context("Registering /r/new").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert_eq!(
            err.to_string(),
            "Registering /r/new: Watcher error: cannot watch /r/new"
        );
    }
}
