//! Directory-backed statement source.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::SourceError;
use crate::source::StatementSource;
use trace_soak_shared::types::{Batch, Statement};

/// Reads statement batches from a directory of JSON files.
///
/// Every file in the directory is expected to hold a JSON array of
/// statements; each file becomes one batch labeled with the file name. Files
/// are read in sorted name order so batches arrive deterministically.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl StatementSource for DirectorySource {
    async fn read_batches(&self) -> Result<Vec<Batch>, SourceError> {
        debug!(dir = %self.dir.display(), "Reading statement batches");

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|e| SourceError::io(&self.dir, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::io(&self.dir, e))?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut batches = Vec::with_capacity(paths.len());
        let mut total_statements = 0;
        for path in paths {
            let data = fs::read_to_string(&path).map_err(|e| SourceError::io(&path, e))?;
            let statements: Vec<Statement> =
                serde_json::from_str(&data).map_err(|e| SourceError::parse(&path, e))?;

            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            debug!(file = %label, count = statements.len(), "Read statement file");
            total_statements += statements.len();
            batches.push(Batch::new(label, statements));
        }

        info!(
            files = batches.len(),
            statements = total_statements,
            "Read all statement batches"
        );
        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_one_batch_per_file_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "b.json",
            r#"[{"actor":{"name":"bob"}},{"actor":{"name":"bob"}}]"#,
        );
        write_file(dir.path(), "a.json", r#"[{"actor":{"name":"alice"}}]"#);

        let source = DirectorySource::new(dir.path());
        let batches = source.read_batches().await.unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].label, "a.json");
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[1].label, "b.json");
        assert_eq!(batches[1].len(), 2);
    }

    #[tokio::test]
    async fn test_rereadable_across_rounds() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.json", r#"[{"actor":{"name":"alice"}}]"#);

        let source = DirectorySource::new(dir.path());
        let first = source.read_batches().await.unwrap();
        let second = source.read_batches().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let source = DirectorySource::new("/nonexistent/statements");
        let result = source.read_batches().await;

        assert!(matches!(result, Err(SourceError::Io { .. })));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "bad.json", "not json");

        let source = DirectorySource::new(dir.path());
        let result = source.read_batches().await;

        assert!(matches!(result, Err(SourceError::Parse { .. })));
    }
}
