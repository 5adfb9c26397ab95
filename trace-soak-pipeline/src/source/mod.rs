//! Statement sources for the delivery pipeline.
//!
//! Provides the `StatementSource` trait for supplying ordered batches of
//! statements, a directory-backed implementation for production use, and an
//! in-memory implementation for tests and local development.

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::SourceError;
use trace_soak_shared::types::Batch;

/// Supplies ordered batches of statements.
///
/// Sources are re-readable: `read_batches` may be called once per round and
/// must return the full set each time.
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn read_batches(&self) -> Result<Vec<Batch>, SourceError>;
}

/// Configuration for the statement source.
///
/// Use this to explicitly choose between the directory-backed source and
/// pre-loaded in-memory batches.
///
/// # Example
///
/// ```ignore
/// use trace_soak_pipeline::source::StatementInput;
///
/// // Production: read JSON files from a directory
/// let source = StatementInput::directory("statements").into_source();
///
/// // Testing: pre-loaded batches
/// let source = StatementInput::memory(batches).into_source();
/// ```
#[derive(Debug, Clone)]
pub enum StatementInput {
    /// Read every file of a directory, one batch per file.
    Directory(PathBuf),
    /// Serve pre-loaded batches.
    Memory(Vec<Batch>),
}

impl StatementInput {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    pub fn memory(batches: Vec<Batch>) -> Self {
        Self::Memory(batches)
    }

    /// Create the appropriate `StatementSource` implementation.
    pub fn into_source(self) -> Box<dyn StatementSource> {
        match self {
            Self::Directory(path) => Box::new(DirectorySource::new(path)),
            Self::Memory(batches) => Box::new(MemorySource::new(batches)),
        }
    }
}
