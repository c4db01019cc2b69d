//! What is open right now.
//!
//! Single-file mode and project mode are two variants of one `Document`, so
//! the editor never sees remnants of the other mode.

use super::artifacts::display_key;
use super::error::WorkspaceError;
use super::persistence::{
    read_json, write_json, ACTIVE_FILE_KEY, EDITOR_CONTENT_KEY, FILE_NAME_KEY, PROJECT_FILES_KEY,
};
use crate::kernel::services::ports::{KeyValueStore, StorageResult};
use crate::models::FileEntity;

pub const UNTITLED_FILE_NAME: &str = "untitled.sv";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Document {
    #[default]
    Empty,
    Single {
        name: String,
        content: String,
    },
    /// `content` is the editor's working copy; `files` stays a load-time snapshot.
    Project {
        files: Vec<FileEntity>,
        active: usize,
        content: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceState {
    document: Document,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.document, Document::Empty)
    }

    pub fn is_project(&self) -> bool {
        matches!(self.document, Document::Project { .. })
    }

    pub fn editor_content(&self) -> &str {
        match &self.document {
            Document::Empty => "",
            Document::Single { content, .. } | Document::Project { content, .. } => content,
        }
    }

    pub fn file_name(&self) -> &str {
        match &self.document {
            Document::Empty => "",
            Document::Single { name, .. } => name,
            Document::Project { files, active, .. } => files[*active].name(),
        }
    }

    pub fn project_files(&self) -> &[FileEntity] {
        match &self.document {
            Document::Project { files, .. } => files,
            _ => &[],
        }
    }

    pub fn active_file_index(&self) -> Option<usize> {
        match &self.document {
            Document::Project { active, .. } => Some(*active),
            _ => None,
        }
    }

    pub fn active_file(&self) -> Option<&FileEntity> {
        match &self.document {
            Document::Project { files, active, .. } => files.get(*active),
            _ => None,
        }
    }

    pub fn display_key(&self) -> String {
        display_key(self.file_name())
    }

    pub fn open_single_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.document = Document::Single {
            name: name.into(),
            content: content.into(),
        };
    }

    pub fn open_project(&mut self, files: Vec<FileEntity>) -> Result<&FileEntity, WorkspaceError> {
        let Some(first) = files.first() else {
            return Err(WorkspaceError::NoMatchingFiles);
        };
        let content = first.content().to_string();
        self.document = Document::Project {
            files,
            active: 0,
            content,
        };
        Ok(&self.project_files()[0])
    }

    /// Reloads the editor from the snapshot of `index`, discarding working-copy edits.
    pub fn switch_active_file(&mut self, index: usize) -> Result<&FileEntity, WorkspaceError> {
        let Document::Project {
            files,
            active,
            content,
        } = &mut self.document
        else {
            return Err(WorkspaceError::IndexOutOfRange { index, len: 0 });
        };
        let len = files.len();
        let Some(selected) = files.get(index) else {
            return Err(WorkspaceError::IndexOutOfRange { index, len });
        };

        *content = selected.content().to_string();
        *active = index;
        Ok(selected)
    }

    /// Updates the working copy only. Returns whether anything changed.
    pub fn edit_content(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.is_empty() {
            if text.is_empty() {
                return false;
            }
            self.document = Document::Single {
                name: String::new(),
                content: text,
            };
            return true;
        }

        match &mut self.document {
            Document::Single { content, .. } | Document::Project { content, .. } => {
                if *content == text {
                    return false;
                }
                *content = text;
                true
            }
            Document::Empty => false,
        }
    }

    pub fn clear(&mut self) {
        self.document = Document::Empty;
    }

    pub fn persist(&self, storage: &mut dyn KeyValueStore) -> StorageResult<()> {
        storage.set(EDITOR_CONTENT_KEY, self.editor_content())?;
        storage.set(FILE_NAME_KEY, self.file_name())?;
        match &self.document {
            Document::Project { files, active, .. } => {
                write_json(storage, PROJECT_FILES_KEY, files)?;
                storage.set(ACTIVE_FILE_KEY, &active.to_string())?;
            }
            Document::Empty | Document::Single { .. } => {
                storage.remove(PROJECT_FILES_KEY)?;
                storage.remove(ACTIVE_FILE_KEY)?;
            }
        }
        Ok(())
    }

    /// Never fails: malformed records are logged and replaced by defaults.
    pub fn restore(storage: &dyn KeyValueStore) -> Self {
        let stored_content = storage.get(EDITOR_CONTENT_KEY);
        let name = storage.get(FILE_NAME_KEY).unwrap_or_default();

        let files: Vec<FileEntity> = match read_json(storage, PROJECT_FILES_KEY) {
            Ok(files) => files.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored project files");
                Vec::new()
            }
        };

        if !files.is_empty() {
            let stored_active = storage
                .get(ACTIVE_FILE_KEY)
                .map(|raw| raw.trim().parse::<usize>());
            let active = match stored_active {
                Some(Ok(index)) if index < files.len() => index,
                other => {
                    tracing::warn!(
                        stored = ?other,
                        len = files.len(),
                        "stored active file index invalid, using first file"
                    );
                    0
                }
            };
            let content = match stored_content {
                Some(content) if files[active].name() == name => content,
                _ => files[active].content().to_string(),
            };
            return Self {
                document: Document::Project {
                    files,
                    active,
                    content,
                },
            };
        }

        let content = stored_content.unwrap_or_default();
        if content.is_empty() && name.is_empty() {
            Self::default()
        } else {
            Self {
                document: Document::Single { name, content },
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
