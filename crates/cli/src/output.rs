//! Rendering of batches on stdout

use anyhow::Result;
use fswatch_watcher::Batch;

/// How each batch is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `[a b c]`, one line per batch
    #[default]
    Plain,
    /// A JSON array of paths, one line per batch
    Json,
}

/// Render one batch as a single line (without the trailing newline)
pub fn render_batch(batch: &Batch, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(batch.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(batch)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn batch() -> Batch {
        let seen: HashSet<PathBuf> = ["w/b.txt", "w/a b.txt"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        Batch::from_seen(seen)
    }

    #[test]
    fn test_plain_output() {
        assert_eq!(
            render_batch(&batch(), OutputFormat::Plain).unwrap(),
            "[w/a b.txt w/b.txt]"
        );
    }

    #[test]
    fn test_json_output_keeps_spaces_unambiguous() {
        assert_eq!(
            render_batch(&batch(), OutputFormat::Json).unwrap(),
            r#"["w/a b.txt","w/b.txt"]"#
        );
    }
}
