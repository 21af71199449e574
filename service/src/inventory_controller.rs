use std::sync::Arc;

use async_std::channel::Sender;
use backend_gateway::{BackendGateway, ListFilter};
use core_types::DocumentId;
use core_types::events::{InventoryEvent, Notification};

use crate::deletion_coordinator::{ConfirmOutcome, DeletionCoordinator};
use crate::document_store::DocumentStore;
use crate::selection::SelectionSet;
use crate::view_models::{DocumentTableViewModel, table_view_model};

/// Commands the display layer can issue. All state mutation flows through
/// `InventoryController::handle`, so the match there is exhaustive over
/// everything a user can do.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    ToggleSelect(DocumentId),
    ToggleSelectAll,
    RequestDelete(DocumentId),
    RequestBatchDelete,
    Confirm,
    Cancel,
    Reload,
    SetFolderFilter(Option<String>),
    SetFileTypeFilter(Option<String>),
}

/// Owns the document snapshot, the selection and the deletion state machine.
///
/// Single-threaded by construction: one command is handled at a time, and a
/// network call only suspends the command being handled.
pub struct InventoryController<G: BackendGateway> {
    gateway: Arc<G>,
    store: DocumentStore,
    selection: SelectionSet,
    coordinator: DeletionCoordinator,
    filter: ListFilter,
    limit: u32,
    load_failed: bool,
    event_tx: Sender<InventoryEvent>,
}

impl<G: BackendGateway> InventoryController<G> {
    pub fn new(gateway: Arc<G>, limit: u32, event_tx: Sender<InventoryEvent>) -> Self {
        Self {
            gateway,
            store: DocumentStore::new(),
            selection: SelectionSet::new(),
            coordinator: DeletionCoordinator::new(),
            filter: ListFilter::default(),
            limit,
            load_failed: false,
            event_tx,
        }
    }

    /// Dispatch one user command. Failures surface as notifications and
    /// events, never as panics.
    pub async fn handle(&mut self, command: InventoryCommand) {
        match command {
            InventoryCommand::ToggleSelect(id) => self.toggle_select(id).await,
            InventoryCommand::ToggleSelectAll => self.toggle_select_all().await,
            InventoryCommand::RequestDelete(id) => self.request_delete(id).await,
            InventoryCommand::RequestBatchDelete => self.request_batch_delete().await,
            InventoryCommand::Confirm => self.confirm().await,
            InventoryCommand::Cancel => self.cancel().await,
            InventoryCommand::Reload => self.load_documents().await,
            InventoryCommand::SetFolderFilter(folder_name) => {
                self.filter.folder_name = folder_name;
                self.load_documents().await;
            }
            InventoryCommand::SetFileTypeFilter(file_type) => {
                self.filter.file_type = file_type;
                self.load_documents().await;
            }
        }
    }

    /// Current table projection for rendering.
    pub fn table(&self) -> DocumentTableViewModel {
        table_view_model(&self.store, &self.selection, self.load_failed)
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    async fn load_documents(&mut self) {
        match self.gateway.list_documents(&self.filter, self.limit).await {
            Ok(documents) => {
                // The snapshot must be fully replaced before the selection is
                // pruned against it.
                self.store.replace(documents);
                self.selection.retain_listed(&self.store.ids());
                self.load_failed = false;
                self.emit(InventoryEvent::DocumentsLoaded {
                    document_count: self.store.len(),
                })
                .await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to load documents");
                self.load_failed = true;
                self.emit(InventoryEvent::LoadFailed {
                    error: error.to_string(),
                })
                .await;
            }
        }
    }

    async fn toggle_select(&mut self, id: DocumentId) {
        if self.store.get(id).is_none() {
            tracing::warn!(id, "toggling selection for an unlisted document");
        }
        self.selection.toggle(id);
        self.emit_selection_changed().await;
    }

    async fn toggle_select_all(&mut self) {
        let ids = self.store.ids();
        if self.selection.is_all_selected(&ids) {
            self.selection.clear();
        } else {
            self.selection.select_all(&ids);
        }
        self.emit_selection_changed().await;
    }

    async fn request_delete(&mut self, id: DocumentId) {
        if let Some(prompt) = self.coordinator.request_single(id, &self.store) {
            self.emit(InventoryEvent::ConfirmationRequired {
                message: prompt.message,
                document_count: prompt.document_count,
            })
            .await;
        }
    }

    async fn request_batch_delete(&mut self) {
        if self.selection.is_empty() {
            self.notify(Notification::warning("No documents selected."))
                .await;
            return;
        }
        if let Some(prompt) = self.coordinator.request_batch(&self.selection) {
            self.emit(InventoryEvent::ConfirmationRequired {
                message: prompt.message,
                document_count: prompt.document_count,
            })
            .await;
        }
    }

    async fn confirm(&mut self) {
        match self.coordinator.confirm(self.gateway.as_ref()).await {
            ConfirmOutcome::NotAwaiting => {}
            ConfirmOutcome::NothingPending => {
                self.notify(Notification::warning("No documents pending deletion."))
                    .await;
            }
            ConfirmOutcome::Completed(outcome) => {
                self.notify(outcome.notification()).await;
                // The reload decides what actually remains; nothing is
                // removed from the snapshot on an assumption of success.
                self.selection.clear();
                self.emit_selection_changed().await;
                self.load_documents().await;
            }
        }
    }

    async fn cancel(&mut self) {
        if self.coordinator.cancel() {
            self.emit(InventoryEvent::ConfirmationClosed).await;
        }
    }

    async fn emit_selection_changed(&self) {
        self.emit(InventoryEvent::SelectionChanged {
            selected_count: self.selection.len(),
        })
        .await;
    }

    async fn notify(&self, notification: Notification) {
        self.emit(InventoryEvent::Notified(notification)).await;
    }

    async fn emit(&self, event: InventoryEvent) {
        if self.event_tx.send(event).await.is_err() {
            tracing::warn!("event receiver dropped, display updates are lost");
        }
    }
}
