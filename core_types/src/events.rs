/// Severity of a transient status notification shown after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Events emitted by the inventory controller for the display layer.
///
/// Every state change that requires a re-render produces one of these.
#[derive(Debug, Clone)]
pub enum InventoryEvent {
    DocumentsLoaded { document_count: usize },
    LoadFailed { error: String },
    SelectionChanged { selected_count: usize },
    ConfirmationRequired { message: String, document_count: usize },
    ConfirmationClosed,
    Notified(Notification),
}
