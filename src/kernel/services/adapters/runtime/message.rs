use crate::kernel::services::ports::UploadPreview;
use crate::kernel::services::ArtifactKind;
use crate::kernel::{Action, WorkspaceError};
use crate::models::FileEntity;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppMessage {
    FileLoaded {
        path: PathBuf,
        file: FileEntity,
    },
    FolderLoaded {
        path: PathBuf,
        files: Vec<FileEntity>,
    },
    LoadFailed {
        path: PathBuf,
        error: WorkspaceError,
    },
    UploadCompleted {
        preview: Option<UploadPreview>,
    },
    ArtifactFailed {
        kind: ArtifactKind,
        key: String,
        error: WorkspaceError,
    },
    BackendFailed {
        op: &'static str,
        error: WorkspaceError,
    },
    SessionCleared,
}

impl AppMessage {
    /// The store action this completion feeds, if any.
    pub fn into_action(self) -> Option<Action> {
        match self {
            AppMessage::FileLoaded { file, .. } => {
                let (name, content) = file.into_parts();
                Some(Action::OpenSingleFile { name, content })
            }
            AppMessage::FolderLoaded { files, .. } => Some(Action::OpenProject { files }),
            AppMessage::LoadFailed { path, error } => Some(Action::LoadFailed { path, error }),
            AppMessage::ArtifactFailed { kind, key, error } => {
                Some(Action::ArtifactFailed { kind, key, error })
            }
            AppMessage::UploadCompleted { .. }
            | AppMessage::BackendFailed { .. }
            | AppMessage::SessionCleared => None,
        }
    }
}
