use super::Receipt;
use crate::error::Result;

/// Display metadata of an admitted input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
}

/// Outcome of a successful append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAdded {
    /// Zero-based position of the new record in the store
    pub index: usize,
}

/// Ordered collection of receipts, paired 1:1 with the files that produced them
#[derive(Debug, Default)]
pub struct DocumentStore {
    receipts: Vec<Receipt>,
    files: Vec<SourceFile>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` and append it. On error nothing is appended.
    pub fn append(&mut self, name: &str, content: &[u8]) -> Result<RecordAdded> {
        let receipt = Receipt::parse(name, content)?;
        let index = self.receipts.len();
        self.receipts.push(receipt);
        self.files.push(SourceFile {
            name: name.to_string(),
        });
        Ok(RecordAdded { index })
    }

    /// Empties both the file list and the parsed receipts
    pub fn clear(&mut self) {
        self.receipts.clear();
        self.files.clear();
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }
}
