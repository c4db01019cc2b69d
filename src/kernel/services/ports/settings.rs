use serde::{Deserialize, Serialize};

use super::config::{ResponseBinding, WorkspaceConfig};
use crate::kernel::recent::DEFAULT_RECENT_CAPACITY;
use crate::models::DEFAULT_EXTENSIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
    #[serde(default = "default_extensions")]
    pub accepted_extensions: Vec<String>,
    #[serde(default)]
    pub response_binding: ResponseBinding,
    #[serde(default)]
    pub storage: StorageKind,
}

fn default_recent_capacity() -> usize {
    DEFAULT_RECENT_CAPACITY
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_capacity: default_recent_capacity(),
            accepted_extensions: default_extensions(),
            response_binding: ResponseBinding::default(),
            storage: StorageKind::default(),
        }
    }
}

impl Settings {
    pub fn workspace_config(&self) -> WorkspaceConfig {
        let accepted_extensions = if self.accepted_extensions.is_empty() {
            default_extensions()
        } else {
            self.accepted_extensions.clone()
        };
        WorkspaceConfig {
            recent_capacity: self.recent_capacity.max(1),
            accepted_extensions,
            response_binding: self.response_binding,
        }
    }
}
