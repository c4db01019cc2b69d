//! Most-recently-used file registry, independent of the open project.

use serde::{Deserialize, Serialize};

use super::persistence::{read_json, write_json, RECENT_FILES_KEY};
use crate::kernel::services::ports::{KeyValueStore, StorageResult};

pub const DEFAULT_RECENT_CAPACITY: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct RecentFiles {
    files: Vec<RecentFile>,
    capacity: usize,
}

impl RecentFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            files: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn restore(storage: &dyn KeyValueStore, capacity: usize) -> Self {
        let mut recent = Self::new(capacity);
        match read_json::<Vec<RecentFile>>(storage, RECENT_FILES_KEY) {
            Ok(Some(files)) => {
                for file in files {
                    if recent.files.len() >= recent.capacity {
                        break;
                    }
                    if !recent.files.iter().any(|f| f.name == file.name) {
                        recent.files.push(file);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "discarding stored recent files"),
        }
        recent
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn snapshot(&self) -> &[RecentFile] {
        &self.files
    }

    pub fn get(&self, name: &str) -> Option<&RecentFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Moves or inserts `name` at the front. Returns whether the list changed.
    pub fn touch(&mut self, name: impl Into<String>, content: impl Into<String>) -> bool {
        let file = RecentFile {
            name: name.into(),
            content: content.into(),
        };
        if self.files.first() == Some(&file) {
            return false;
        }

        self.files.retain(|f| f.name != file.name);
        self.files.insert(0, file);
        self.files.truncate(self.capacity);
        true
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn persist(&self, storage: &mut dyn KeyValueStore) -> StorageResult<()> {
        write_json(storage, RECENT_FILES_KEY, &self.files)
    }
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/recent.rs"]
mod tests;
