//! Storage keys and JSON helpers shared by the kernel components.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::WorkspaceError;
use crate::kernel::services::ports::{KeyValueStore, StorageResult};

pub const EDITOR_CONTENT_KEY: &str = "editorContent";
pub const FILE_NAME_KEY: &str = "fileName";
pub const PROJECT_FILES_KEY: &str = "projectFiles";
pub const ACTIVE_FILE_KEY: &str = "activeFile";
pub const RECENT_FILES_KEY: &str = "recentFiles";
pub const ARTIFACT_KEY_PREFIX: &str = "artifact-";

pub fn artifact_storage_key(display_key: &str) -> String {
    format!("{}{}", ARTIFACT_KEY_PREFIX, display_key)
}

/// `Ok(None)` when the key is absent.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, WorkspaceError> {
    let Some(raw) = storage.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| WorkspaceError::MalformedPersistedState {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

pub fn write_json<T: Serialize + ?Sized>(
    storage: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}
