use rustc_hash::FxHashSet;

use super::artifacts::ArtifactCache;
use super::recent::RecentFiles;
use super::workspace::WorkspaceState;
use crate::kernel::services::ports::WorkspaceConfig;
use crate::kernel::services::ArtifactKind;

/// Backend requests that have been issued and not answered yet.
#[derive(Debug, Default)]
pub struct InFlight {
    requests: FxHashSet<(ArtifactKind, String)>,
}

impl InFlight {
    pub fn insert(&mut self, kind: ArtifactKind, key: &str) -> bool {
        self.requests.insert((kind, key.to_string()))
    }

    pub fn remove(&mut self, kind: ArtifactKind, key: &str) -> bool {
        self.requests.remove(&(kind, key.to_string()))
    }

    pub fn contains(&self, kind: ArtifactKind, key: &str) -> bool {
        self.requests.contains(&(kind, key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

pub struct AppState {
    pub workspace: WorkspaceState,
    pub artifacts: ArtifactCache,
    pub recent: RecentFiles,
    pub in_flight: InFlight,
    pub config: WorkspaceConfig,
}

impl AppState {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            workspace: WorkspaceState::new(),
            artifacts: ArtifactCache::new(),
            recent: RecentFiles::new(config.recent_capacity),
            in_flight: InFlight::default(),
            config,
        }
    }
}
