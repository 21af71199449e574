use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub mod events;

pub type DocumentId = i64;

/// Summary of a stored document as listed by the backend.
///
/// The list endpoint replaces these wholesale on every load; rows are never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(rename = "seq_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub folder_name: String,
    #[serde(default)]
    pub chunk_count: u32,
    #[serde(default)]
    pub image_count: u32,
}

/// Known document file types, parsed from the backend's free-form
/// `file_type` strings. Anything unrecognized folds to `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Copy, EnumIter, Display)]
pub enum FileKind {
    #[strum(serialize = "PDF")]
    Pdf,
    #[strum(serialize = "DOC")]
    Doc,
    #[strum(serialize = "DOCX")]
    Docx,
    #[strum(serialize = "TXT")]
    Txt,
    #[strum(serialize = "XLS")]
    Xls,
    #[strum(serialize = "XLSX")]
    Xlsx,
    #[strum(serialize = "CSV")]
    Csv,
    #[strum(serialize = "JPG")]
    Jpg,
    #[strum(serialize = "JPEG")]
    Jpeg,
    #[strum(serialize = "PNG")]
    Png,
    #[strum(serialize = "UNKNOWN")]
    Other,
}

impl FileKind {
    pub fn from_extension(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "doc" => FileKind::Doc,
            "docx" => FileKind::Docx,
            "txt" => FileKind::Txt,
            "xls" => FileKind::Xls,
            "xlsx" => FileKind::Xlsx,
            "csv" => FileKind::Csv,
            "jpg" => FileKind::Jpg,
            "jpeg" => FileKind::Jpeg,
            "png" => FileKind::Png,
            _ => FileKind::Other,
        }
    }
}
