use backend_gateway::BackendGateway;
use core_types::DocumentId;
use core_types::events::Notification;

use crate::document_store::DocumentStore;
use crate::selection::SelectionSet;

/// Lifecycle of a deletion. A request opens the confirmation step, a
/// confirmation executes exactly one backend request, and every completion
/// path ends back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    AwaitingConfirmation,
    Executing,
}

/// Message shown to the user before a deletion is carried out.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationPrompt {
    pub message: String,
    pub document_count: usize,
}

/// What happened when a confirmed deletion ran.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// Single delete succeeded, with the number of vectors removed.
    Deleted { vector_count: i64 },
    /// The backend refused a single delete and said why.
    DeleteRejected { message: String },
    /// Batch delete removed every requested document.
    BatchDeleted { total_deleted: i64 },
    /// Batch delete removed some documents but not others.
    BatchPartial {
        total_deleted: i64,
        failed_ids: Vec<DocumentId>,
    },
    /// The request never produced a usable response.
    RequestFailed,
}

impl DeletionOutcome {
    /// The user-facing notification for this outcome.
    pub fn notification(&self) -> Notification {
        match self {
            DeletionOutcome::Deleted { vector_count } => Notification::success(format!(
                "Document deleted ({} vectors removed)",
                vector_count
            )),
            DeletionOutcome::DeleteRejected { message } => Notification::error(message.clone()),
            DeletionOutcome::BatchDeleted { total_deleted } =>
                Notification::success(format!("{} documents deleted", total_deleted)),
            DeletionOutcome::BatchPartial {
                total_deleted,
                failed_ids,
            } => Notification::warning(format!(
                "{} documents deleted, {} failed",
                total_deleted,
                failed_ids.len()
            )),
            DeletionOutcome::RequestFailed => {
                Notification::error("An error occurred while deleting.")
            }
        }
    }
}

/// Result of a `confirm` call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// The coordinator was not waiting for a confirmation; nothing happened.
    NotAwaiting,
    /// Confirmation arrived with nothing pending; nothing happened.
    NothingPending,
    Completed(DeletionOutcome),
}

/// Decides what is pending deletion, gates it behind a confirmation and, on
/// confirmation, issues the single or batch delete request.
#[derive(Debug, Default)]
pub struct DeletionCoordinator {
    state: CoordinatorState,
    pending: Vec<DocumentId>,
}

impl DeletionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn pending(&self) -> &[DocumentId] {
        &self.pending
    }

    /// Start a single-document deletion. Only valid while idle.
    pub fn request_single(
        &mut self,
        id: DocumentId,
        store: &DocumentStore,
    ) -> Option<ConfirmationPrompt> {
        if self.state != CoordinatorState::Idle {
            tracing::warn!(state = ?self.state, id, "delete requested while another deletion is open");
            return None;
        }
        self.pending = vec![id];
        self.state = CoordinatorState::AwaitingConfirmation;

        let (title, chunk_count, image_count) = match store.get(id) {
            Some(document) if !document.title.is_empty() => (
                document.title.clone(),
                document.chunk_count,
                document.image_count,
            ),
            Some(document) => (
                format!("Document {}", id),
                document.chunk_count,
                document.image_count,
            ),
            None => (format!("Document {}", id), 0, 0),
        };

        Some(ConfirmationPrompt {
            message: format!(
                "Delete \"{}\"? This removes {} chunks and {} images.",
                title, chunk_count, image_count
            ),
            document_count: 1,
        })
    }

    /// Start a deletion of everything currently selected. Only valid while
    /// idle and with a non-empty selection; otherwise no transition happens.
    pub fn request_batch(&mut self, selection: &SelectionSet) -> Option<ConfirmationPrompt> {
        if self.state != CoordinatorState::Idle {
            tracing::warn!(state = ?self.state, "batch delete requested while another deletion is open");
            return None;
        }
        if selection.is_empty() {
            return None;
        }
        self.pending = selection.to_sorted_vec();
        self.state = CoordinatorState::AwaitingConfirmation;

        Some(ConfirmationPrompt {
            message: format!("Delete {} selected documents?", self.pending.len()),
            document_count: self.pending.len(),
        })
    }

    /// Abandon the pending deletion. Returns true if there was one to
    /// abandon. The selection set is not touched.
    pub fn cancel(&mut self) -> bool {
        if self.state != CoordinatorState::AwaitingConfirmation {
            return false;
        }
        self.pending.clear();
        self.state = CoordinatorState::Idle;
        true
    }

    /// Execute the pending deletion. Exactly one request is issued per
    /// confirmation; the state guard makes a re-entrant confirm ineffective.
    /// The operation is never retried.
    #[tracing::instrument(skip_all)]
    pub async fn confirm<G: BackendGateway>(&mut self, gateway: &G) -> ConfirmOutcome {
        if self.state != CoordinatorState::AwaitingConfirmation {
            tracing::debug!(state = ?self.state, "confirm ignored");
            return ConfirmOutcome::NotAwaiting;
        }
        if self.pending.is_empty() {
            tracing::warn!("confirm received with no documents pending");
            return ConfirmOutcome::NothingPending;
        }

        self.state = CoordinatorState::Executing;
        let pending = std::mem::take(&mut self.pending);

        let outcome = if let [id] = pending[..] {
            match gateway.delete_document(id).await {
                Ok(result) if result.success => DeletionOutcome::Deleted {
                    vector_count: result.deleted_vectors,
                },
                Ok(result) => DeletionOutcome::DeleteRejected {
                    message: if result.message.is_empty() {
                        "Failed to delete the document.".to_string()
                    } else {
                        result.message
                    },
                },
                Err(error) => {
                    tracing::error!(%error, id, "delete request failed");
                    DeletionOutcome::RequestFailed
                }
            }
        } else {
            match gateway.delete_documents(&pending).await {
                Ok(result) if result.success => DeletionOutcome::BatchDeleted {
                    total_deleted: result.total_deleted,
                },
                Ok(result) => DeletionOutcome::BatchPartial {
                    total_deleted: result.total_deleted,
                    failed_ids: result.failed_ids,
                },
                Err(error) => {
                    tracing::error!(%error, count = pending.len(), "batch delete request failed");
                    DeletionOutcome::RequestFailed
                }
            }
        };

        self.state = CoordinatorState::Idle;
        ConfirmOutcome::Completed(outcome)
    }
}
