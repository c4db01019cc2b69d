//! Per-file cache of backend artifacts.
//!
//! Entries are keyed by display key and stored one JSON record per key, so a
//! restart with the same file open restores the same view and explanation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::WorkspaceError;
use super::persistence::{artifact_storage_key, read_json, write_json};
use crate::kernel::services::ports::KeyValueStore;

pub const BLANK_KEY: &str = "blank";

/// Cache identity of a file. Re-derive it after every switch.
pub fn display_key(file_name: &str) -> String {
    if file_name.trim().is_empty() {
        BLANK_KEY.to_string()
    } else {
        file_name.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabView {
    #[default]
    Code,
    Explanation,
    Testbench,
}

impl TabView {
    pub fn as_str(self) -> &'static str {
        match self {
            TabView::Code => "code",
            TabView::Explanation => "explanation",
            TabView::Testbench => "testbench",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "code" => Some(TabView::Code),
            "explanation" => Some(TabView::Explanation),
            "testbench" => Some(TabView::Testbench),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactCacheEntry {
    explanation: String,
    testbench: String,
    testbench_enabled: bool,
    active_tab_view: TabView,
}

impl ArtifactCacheEntry {
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn testbench(&self) -> &str {
        &self.testbench
    }

    pub fn testbench_enabled(&self) -> bool {
        self.testbench_enabled
    }

    pub fn active_tab_view(&self) -> TabView {
        self.active_tab_view
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    // Stored records are untrusted.
    fn sanitized(mut self) -> Self {
        if !self.testbench_enabled {
            self.testbench.clear();
            if self.active_tab_view == TabView::Testbench {
                self.active_tab_view = TabView::Code;
            }
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct ArtifactCache {
    entries: FxHashMap<String, ArtifactCacheEntry>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// In-memory lookup only; does not create the entry.
    pub fn peek(&self, key: &str) -> Option<&ArtifactCacheEntry> {
        self.entries.get(key)
    }

    /// Existing entry, else the stored record, else a default. Never fails.
    pub fn entry(&mut self, key: &str, storage: &dyn KeyValueStore) -> &ArtifactCacheEntry {
        self.load_mut(key, storage)
    }

    /// Returns whether the tab switched to the explanation view. Re-delivering
    /// the stored text is a no-op and keeps the user's current tab.
    pub fn set_explanation(
        &mut self,
        key: &str,
        text: impl Into<String>,
        active_key: &str,
        storage: &mut dyn KeyValueStore,
    ) -> bool {
        let text = text.into();
        let switch_tab = !text.is_empty() && key == active_key;
        let entry = self.load_mut(key, &*storage);
        if entry.explanation == text {
            return false;
        }
        entry.explanation = text;
        if switch_tab {
            entry.active_tab_view = TabView::Explanation;
        }
        self.persist(key, storage);
        switch_tab
    }

    /// Returns whether the tab switched to the testbench view. Same duplicate
    /// rule as explanations.
    pub fn set_testbench(
        &mut self,
        key: &str,
        code: impl Into<String>,
        active_key: &str,
        storage: &mut dyn KeyValueStore,
    ) -> bool {
        let code = code.into();
        let switch_tab = key == active_key;
        let entry = self.load_mut(key, &*storage);
        if entry.testbench_enabled && entry.testbench == code {
            return false;
        }
        entry.testbench = code;
        entry.testbench_enabled = true;
        if switch_tab {
            entry.active_tab_view = TabView::Testbench;
        }
        self.persist(key, storage);
        switch_tab
    }

    pub fn reset_testbench(&mut self, key: &str, storage: &mut dyn KeyValueStore) {
        let entry = self.load_mut(key, &*storage);
        entry.testbench.clear();
        entry.testbench_enabled = false;
        entry.active_tab_view = TabView::Code;
        self.persist(key, storage);
    }

    /// Returns whether the view changed.
    pub fn set_active_tab_view(
        &mut self,
        key: &str,
        view: TabView,
        storage: &mut dyn KeyValueStore,
    ) -> Result<bool, WorkspaceError> {
        let entry = self.load_mut(key, &*storage);
        if view == TabView::Testbench && !entry.testbench_enabled {
            return Err(WorkspaceError::InvalidTabView);
        }
        if entry.active_tab_view == view {
            return Ok(false);
        }
        entry.active_tab_view = view;
        self.persist(key, storage);
        Ok(true)
    }

    /// Drops every in-memory entry. Stored records are wiped by the caller.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn load_mut(&mut self, key: &str, storage: &dyn KeyValueStore) -> &mut ArtifactCacheEntry {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| load_entry(key, storage))
    }

    fn persist(&self, key: &str, storage: &mut dyn KeyValueStore) {
        let Some(entry) = self.entries.get(key) else {
            return;
        };
        if let Err(e) = write_json(storage, &artifact_storage_key(key), entry) {
            tracing::warn!(key, error = %e, "failed to persist artifact entry");
        }
    }
}

fn load_entry(key: &str, storage: &dyn KeyValueStore) -> ArtifactCacheEntry {
    match read_json::<ArtifactCacheEntry>(storage, &artifact_storage_key(key)) {
        Ok(Some(entry)) => {
            tracing::debug!(key, "artifact entry restored");
            entry.sanitized()
        }
        Ok(None) => ArtifactCacheEntry::default(),
        Err(e) => {
            tracing::warn!(error = %e, "discarding stored artifact entry");
            ArtifactCacheEntry::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/artifacts.rs"]
mod tests;
