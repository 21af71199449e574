use async_trait::async_trait;
use core_types::{DocumentId, DocumentSummary};
use serde::{Deserialize, Serialize};
use surf::Url;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Filters accepted by the document list endpoint. `None` means the
/// corresponding query parameter is omitted entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub folder_name: Option<String>,
    pub file_type: Option<String>,
}

/// Result of deleting a single document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleDeleteResult {
    pub success: bool,
    #[serde(default)]
    pub deleted_vectors: i64,
    #[serde(default)]
    pub message: String,
}

/// Result of a batch delete. `failed_ids` holds the ids the backend could
/// not delete; a non-empty list means the batch partially succeeded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchDeleteResult {
    pub success: bool,
    #[serde(default)]
    pub total_deleted: i64,
    #[serde(default, rename = "failed")]
    pub failed_ids: Vec<DocumentId>,
}

#[derive(Debug, Serialize)]
struct BatchDeleteRequest<'a> {
    doc_ids: &'a [DocumentId],
}

/// Backend endpoints the inventory view depends on.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Fetch the current document list, newest snapshot wins.
    async fn list_documents(
        &self,
        filter: &ListFilter,
        limit: u32,
    ) -> Result<Vec<DocumentSummary>, GatewayError>;

    /// Delete one document and its vectors.
    async fn delete_document(&self, id: DocumentId) -> Result<SingleDeleteResult, GatewayError>;

    /// Delete several documents in one request.
    async fn delete_documents(&self, ids: &[DocumentId])
    -> Result<BatchDeleteResult, GatewayError>;
}

/// Production implementation talking HTTP to the document backend.
pub struct HttpBackendGateway {
    base_url: Url,
}

impl HttpBackendGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url =
            Url::parse(base_url).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        Ok(Self { base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))
    }
}

fn list_url(base: &Url, filter: &ListFilter, limit: u32) -> Result<Url, GatewayError> {
    let mut url = base
        .join("documents")
        .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("limit", &limit.to_string());
        if let Some(folder_name) = filter.folder_name.as_deref() {
            pairs.append_pair("folder_name", folder_name);
        }
        if let Some(file_type) = filter.file_type.as_deref() {
            pairs.append_pair("file_type", file_type);
        }
    }
    Ok(url)
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn list_documents(
        &self,
        filter: &ListFilter,
        limit: u32,
    ) -> Result<Vec<DocumentSummary>, GatewayError> {
        let url = list_url(&self.base_url, filter, limit)?;
        let mut response = surf::get(url)
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus(status as u16));
        }

        response
            .body_json::<Vec<DocumentSummary>>()
            .await
            .map_err(|e| GatewayError::InvalidBody(e.to_string()))
    }

    async fn delete_document(&self, id: DocumentId) -> Result<SingleDeleteResult, GatewayError> {
        let url = self.endpoint(&format!("documents/{}", id))?;
        // Delete failures are reported in the JSON body, so the status code
        // is not checked here.
        surf::delete(url)
            .recv_json()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))
    }

    async fn delete_documents(
        &self,
        ids: &[DocumentId],
    ) -> Result<BatchDeleteResult, GatewayError> {
        let url = self.endpoint("documents/batch-delete")?;
        surf::post(url)
            .body_json(&BatchDeleteRequest { doc_ids: ids })
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?
            .recv_json()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))
    }
}
