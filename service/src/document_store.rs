use core_types::{DocumentId, DocumentSummary};

/// In-memory snapshot of the currently listed documents.
///
/// Replaced wholesale on every successful load. After a deletion the backend
/// is the sole source of truth for what remains; nothing is removed from the
/// snapshot locally.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<DocumentSummary>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, documents: Vec<DocumentSummary>) {
        self.documents = documents;
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn get(&self, id: DocumentId) -> Option<&DocumentSummary> {
        self.documents.iter().find(|document| document.id == id)
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|document| document.id).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Distinct non-empty folder names in sorted order, for the folder
    /// filter dropdown.
    pub fn folder_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .documents
            .iter()
            .map(|document| document.folder_name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
