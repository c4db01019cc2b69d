use std::path::PathBuf;

use crate::kernel::artifacts::TabView;
use crate::kernel::error::WorkspaceError;
use crate::kernel::services::{ArtifactKind, ArtifactMessage};
use crate::models::FileEntity;

#[derive(Debug, Clone)]
pub enum Action {
    OpenPath(PathBuf),
    OpenFolder(PathBuf),
    OpenSingleFile {
        name: String,
        content: String,
    },
    OpenProject {
        files: Vec<FileEntity>,
    },
    NewFile,
    OpenRecent {
        name: String,
    },
    SwitchActiveFile {
        index: usize,
    },
    EditContent(String),
    SetActiveTabView {
        view: TabView,
    },
    RequestExplanation,
    RequestTestbench,
    ResetTestbench,
    CopyExplanation,
    ArtifactArrived(ArtifactMessage),
    ArtifactFailed {
        kind: ArtifactKind,
        key: String,
        error: WorkspaceError,
    },
    LoadFailed {
        path: PathBuf,
        error: WorkspaceError,
    },
    ClearAll,
}
