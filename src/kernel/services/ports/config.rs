use serde::{Deserialize, Serialize};

use crate::kernel::recent::DEFAULT_RECENT_CAPACITY;
use crate::models::{Normalizer, DEFAULT_EXTENSIONS};

/// Where an artifact that finishes after a file switch ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBinding {
    /// Stored under the file the request was issued for.
    #[default]
    Originating,
    /// Stored under whatever file is active when the response lands.
    ActiveAtArrival,
}

#[derive(Clone, Debug)]
pub struct WorkspaceConfig {
    pub recent_capacity: usize,
    pub accepted_extensions: Vec<String>,
    pub response_binding: ResponseBinding,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            response_binding: ResponseBinding::Originating,
        }
    }
}

impl WorkspaceConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.accepted_extensions)
    }
}
