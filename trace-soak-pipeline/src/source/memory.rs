//! In-memory statement source for testing and local development.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::source::StatementSource;
use trace_soak_shared::types::Batch;

/// Statement source that serves pre-loaded batches.
///
/// Each `read_batches` call returns a fresh copy, matching the re-readable
/// contract of the directory source.
pub struct MemorySource {
    batches: Vec<Batch>,
}

impl MemorySource {
    pub fn new(batches: Vec<Batch>) -> Self {
        Self { batches }
    }
}

#[async_trait]
impl StatementSource for MemorySource {
    async fn read_batches(&self) -> Result<Vec<Batch>, SourceError> {
        Ok(self.batches.clone())
    }
}
