//! File record shared by the project list and the recent-files registry

use serde::{Deserialize, Serialize};

/// One source file as it was read at load time.
///
/// Entities are never edited in place: a re-upload produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntity {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    path: String,
    #[serde(default)]
    content: String,
}

impl FileEntity {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }

    /// A file opened on its own, outside any folder.
    pub fn standalone(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative path; records restored without one fall back to the name.
    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.content)
    }
}
