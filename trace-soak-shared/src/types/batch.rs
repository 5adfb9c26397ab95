use crate::types::Statement;

/// Ordered sequence of statements derived from one logical source unit
/// (typically one file). Statements keep their source order end to end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    /// Human-readable origin of the batch, e.g. the source file name.
    pub label: String,
    pub statements: Vec<Statement>,
}

impl Batch {
    pub fn new(label: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            label: label.into(),
            statements,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
