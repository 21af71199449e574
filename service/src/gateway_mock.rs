//! Scripted backend gateway for exercising the inventory flow in tests
//! without a running backend.
//!
//! The mock records every call it receives and serves whatever responses the
//! test scripted beforehand:
//!
//! ```rust,ignore
//! let gateway = Arc::new(MockBackendGateway::new());
//! gateway.serve_documents(vec![document(1, "a"), document(2, "b")]);
//! gateway.fail_deletes_with("connection reset");
//!
//! // drive the controller...
//!
//! assert_eq!(gateway.list_call_count(), 2);
//! assert_eq!(gateway.single_delete_calls(), vec![1]);
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use backend_gateway::{
    BackendGateway, BatchDeleteResult, GatewayError, ListFilter, SingleDeleteResult,
};
use core_types::{DocumentId, DocumentSummary};

#[derive(Default)]
pub struct MockBackendGateway {
    documents: Mutex<Vec<DocumentSummary>>,
    list_error: Mutex<Option<String>>,
    single_result: Mutex<Option<SingleDeleteResult>>,
    batch_result: Mutex<Option<BatchDeleteResult>>,
    delete_error: Mutex<Option<String>>,

    list_calls: Mutex<Vec<(ListFilter, u32)>>,
    single_calls: Mutex<Vec<DocumentId>>,
    batch_calls: Mutex<Vec<Vec<DocumentId>>>,
}

impl MockBackendGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the documents served by list calls from now on.
    pub fn serve_documents(&self, documents: Vec<DocumentSummary>) {
        *self.documents.lock().unwrap() = documents;
    }

    /// Make list calls fail at the transport level.
    pub fn fail_list_with(&self, error: impl Into<String>) {
        *self.list_error.lock().unwrap() = Some(error.into());
    }

    pub fn respond_to_single_delete(&self, result: SingleDeleteResult) {
        *self.single_result.lock().unwrap() = Some(result);
    }

    pub fn respond_to_batch_delete(&self, result: BatchDeleteResult) {
        *self.batch_result.lock().unwrap() = Some(result);
    }

    /// Make both delete endpoints fail at the transport level.
    pub fn fail_deletes_with(&self, error: impl Into<String>) {
        *self.delete_error.lock().unwrap() = Some(error.into());
    }

    /// Clear scripted failures (useful between test phases).
    pub fn clear_failures(&self) {
        *self.list_error.lock().unwrap() = None;
        *self.delete_error.lock().unwrap() = None;
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn last_list_filter(&self) -> Option<ListFilter> {
        self.list_calls
            .lock()
            .unwrap()
            .last()
            .map(|(filter, _)| filter.clone())
    }

    pub fn single_delete_calls(&self) -> Vec<DocumentId> {
        self.single_calls.lock().unwrap().clone()
    }

    pub fn batch_delete_calls(&self) -> Vec<Vec<DocumentId>> {
        self.batch_calls.lock().unwrap().clone()
    }

    /// Total number of delete requests of either kind.
    pub fn delete_call_count(&self) -> usize {
        self.single_calls.lock().unwrap().len() + self.batch_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BackendGateway for MockBackendGateway {
    async fn list_documents(
        &self,
        filter: &ListFilter,
        limit: u32,
    ) -> Result<Vec<DocumentSummary>, GatewayError> {
        self.list_calls
            .lock()
            .unwrap()
            .push((filter.clone(), limit));
        if let Some(error) = self.list_error.lock().unwrap().as_ref() {
            return Err(GatewayError::RequestFailed(error.clone()));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<SingleDeleteResult, GatewayError> {
        self.single_calls.lock().unwrap().push(id);
        if let Some(error) = self.delete_error.lock().unwrap().as_ref() {
            return Err(GatewayError::RequestFailed(error.clone()));
        }
        Ok(self
            .single_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(SingleDeleteResult {
                success: true,
                deleted_vectors: 0,
                message: String::new(),
            }))
    }

    async fn delete_documents(
        &self,
        ids: &[DocumentId],
    ) -> Result<BatchDeleteResult, GatewayError> {
        self.batch_calls.lock().unwrap().push(ids.to_vec());
        if let Some(error) = self.delete_error.lock().unwrap().as_ref() {
            return Err(GatewayError::RequestFailed(error.clone()));
        }
        Ok(self
            .batch_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(BatchDeleteResult {
                success: true,
                total_deleted: ids.len() as i64,
                failed_ids: Vec::new(),
            }))
    }
}

/// Minimal document fixture.
pub fn document(id: DocumentId, title: &str) -> DocumentSummary {
    DocumentSummary {
        id,
        title: title.to_string(),
        file_type: "pdf".to_string(),
        folder_name: String::new(),
        chunk_count: 0,
        image_count: 0,
    }
}

pub fn document_in_folder(id: DocumentId, title: &str, folder_name: &str) -> DocumentSummary {
    DocumentSummary {
        folder_name: folder_name.to_string(),
        ..document(id, title)
    }
}
