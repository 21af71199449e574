use core_types::{DocumentId, DocumentSummary, FileKind};

use crate::document_store::DocumentStore;
use crate::selection::SelectionSet;

/// One renderable table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRowViewModel {
    pub id: DocumentId,
    pub title: String,
    pub kind: FileKind,
    pub kind_label: String,
    pub folder_name: String,
    pub chunk_count: u32,
    pub image_count: u32,
    pub selected: bool,
}

/// What to show instead of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePlaceholder {
    /// There are no documents.
    Empty,
    /// The last load failed; explain instead of showing stale rows.
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTableViewModel {
    pub rows: Vec<DocumentRowViewModel>,
    pub total_count: usize,
    pub selected_count: usize,
    pub all_selected: bool,
    pub delete_selected_enabled: bool,
    pub folder_options: Vec<String>,
    pub placeholder: Option<TablePlaceholder>,
}

/// Project the store and selection into a renderable table.
///
/// Pure: rendering never mutates the selection or the pending deletion.
pub fn table_view_model(
    store: &DocumentStore,
    selection: &SelectionSet,
    load_failed: bool,
) -> DocumentTableViewModel {
    let rows: Vec<DocumentRowViewModel> = store
        .documents()
        .iter()
        .map(|document| row_view_model(document, selection.contains(document.id)))
        .collect();

    let placeholder = if load_failed {
        Some(TablePlaceholder::LoadFailed)
    } else if rows.is_empty() {
        Some(TablePlaceholder::Empty)
    } else {
        None
    };

    DocumentTableViewModel {
        total_count: rows.len(),
        selected_count: selection.len(),
        all_selected: selection.is_all_selected(&store.ids()),
        delete_selected_enabled: !selection.is_empty(),
        folder_options: store.folder_names(),
        placeholder,
        rows,
    }
}

fn row_view_model(document: &DocumentSummary, selected: bool) -> DocumentRowViewModel {
    let kind = FileKind::from_extension(&document.file_type);
    DocumentRowViewModel {
        id: document.id,
        title: if document.title.is_empty() {
            "(untitled)".to_string()
        } else {
            document.title.clone()
        },
        kind,
        kind_label: kind.to_string(),
        folder_name: if document.folder_name.is_empty() {
            "-".to_string()
        } else {
            document.folder_name.clone()
        },
        chunk_count: document.chunk_count,
        image_count: document.image_count,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway_mock::{document, document_in_folder};

    fn store_with(documents: Vec<DocumentSummary>) -> DocumentStore {
        let mut store = DocumentStore::new();
        store.replace(documents);
        store
    }

    #[test]
    fn test_rows_reflect_selection_membership() {
        let store = store_with(vec![document(1, "a"), document(2, "b"), document(3, "c")]);
        let mut selection = SelectionSet::new();
        selection.toggle(2);

        let table = table_view_model(&store, &selection, false);
        assert_eq!(table.total_count, 3);
        assert_eq!(table.selected_count, 1);
        assert!(!table.all_selected);
        assert!(table.delete_selected_enabled);
        let checked: Vec<DocumentId> = table
            .rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.id)
            .collect();
        assert_eq!(checked, vec![2]);
    }

    #[test]
    fn test_header_state_with_everything_selected() {
        let store = store_with(vec![document(1, "a"), document(2, "b")]);
        let mut selection = SelectionSet::new();
        selection.select_all(&store.ids());

        let table = table_view_model(&store, &selection, false);
        assert!(table.all_selected);
        assert_eq!(table.selected_count, 2);
    }

    #[test]
    fn test_row_fallbacks_and_kind_labels() {
        let mut untitled = document_in_folder(1, "", "");
        untitled.file_type = "docx".to_string();
        let mut odd = document_in_folder(2, "scan", "inbox");
        odd.file_type = "hwp".to_string();
        let store = store_with(vec![untitled, odd]);

        let table = table_view_model(&store, &SelectionSet::new(), false);
        assert_eq!(table.rows[0].title, "(untitled)");
        assert_eq!(table.rows[0].folder_name, "-");
        assert_eq!(table.rows[0].kind_label, "DOCX");
        assert_eq!(table.rows[1].kind, FileKind::Other);
        assert_eq!(table.rows[1].kind_label, "UNKNOWN");
    }

    #[test]
    fn test_placeholders() {
        let empty = store_with(vec![]);
        let selection = SelectionSet::new();

        let table = table_view_model(&empty, &selection, false);
        assert_eq!(table.placeholder, Some(TablePlaceholder::Empty));
        assert!(!table.delete_selected_enabled);

        let table = table_view_model(&empty, &selection, true);
        assert_eq!(table.placeholder, Some(TablePlaceholder::LoadFailed));

        // a failed reload hides rows kept from the previous snapshot
        let stale = store_with(vec![document(1, "a")]);
        let table = table_view_model(&stale, &selection, true);
        assert_eq!(table.placeholder, Some(TablePlaceholder::LoadFailed));
    }

    #[test]
    fn test_folder_options_come_from_the_store() {
        let store = store_with(vec![
            document_in_folder(1, "a", "reports"),
            document_in_folder(2, "b", "archive"),
            document_in_folder(3, "c", "reports"),
        ]);
        let table = table_view_model(&store, &SelectionSet::new(), false);
        assert_eq!(table.folder_options, vec!["archive", "reports"]);
    }
}
