use std::path::PathBuf;

use crate::kernel::recent::RecentFile;
use crate::models::FileEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFile(PathBuf),
    LoadFolder(PathBuf),
    UploadFile {
        name: String,
        content: String,
    },
    UploadFolder {
        files: Vec<FileEntity>,
    },
    RequestExplanation {
        key: String,
        source: String,
    },
    RequestTestbench {
        key: String,
        source: String,
    },
    ClearBackendSession,
    SetClipboardText(String),
    RecentFilesChanged(Vec<RecentFile>),
    Notify(Notification),
}
