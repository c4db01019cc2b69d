use super::artifacts::{display_key, ArtifactCacheEntry, TabView};
use super::error::WorkspaceError;
use super::recent::RecentFiles;
use super::workspace::{WorkspaceState, UNTITLED_FILE_NAME};
use super::{Action, AppState, Effect, Notification};
use crate::kernel::services::ports::{KeyValueStore, ResponseBinding, WorkspaceConfig};
use crate::kernel::services::{ArtifactKind, ArtifactMessage};
use crate::models::FileEntity;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
    pub error: Option<WorkspaceError>,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }

    fn with_effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: false,
            error: None,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
            error: None,
        }
    }

    fn failed(error: WorkspaceError, effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: false,
            error: Some(error),
        }
    }
}

/// Owner of the workspace, the artifact cache, the recent registry and the
/// storage they share. Every mutation runs to completion inside `dispatch`.
pub struct Store {
    state: AppState,
    storage: Box<dyn KeyValueStore>,
}

impl Store {
    /// Restores the previous session from `storage`.
    pub fn new(config: WorkspaceConfig, storage: Box<dyn KeyValueStore>) -> Self {
        let mut state = AppState::new(config);
        state.workspace = WorkspaceState::restore(storage.as_ref());
        state.recent = RecentFiles::restore(storage.as_ref(), state.config.recent_capacity);
        tracing::info!(
            file = state.workspace.file_name(),
            project_files = state.workspace.project_files().len(),
            recent = state.recent.len(),
            "workspace restored"
        );
        Self { state, storage }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn into_storage(self) -> Box<dyn KeyValueStore> {
        self.storage
    }

    pub fn active_key(&self) -> String {
        self.state.workspace.display_key()
    }

    pub fn active_entry(&mut self) -> &ArtifactCacheEntry {
        let key = self.active_key();
        self.state.artifacts.entry(&key, self.storage.as_ref())
    }

    pub fn entry(&mut self, key: &str) -> &ArtifactCacheEntry {
        self.state.artifacts.entry(key, self.storage.as_ref())
    }

    /// Whether the active file has a `kind` request outstanding.
    pub fn is_loading(&self, kind: ArtifactKind) -> bool {
        self.state.in_flight.contains(kind, &self.active_key())
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenPath(path) => DispatchResult::with_effects(vec![Effect::LoadFile(path)]),
            Action::OpenFolder(path) => {
                DispatchResult::with_effects(vec![Effect::LoadFolder(path)])
            }
            Action::OpenSingleFile { name, content } => {
                let mut effects = vec![Effect::UploadFile {
                    name: name.clone(),
                    content: content.clone(),
                }];
                effects.push(self.open_single(name, content));
                DispatchResult::changed(effects)
            }
            Action::OpenProject { files } => self.open_project(files),
            Action::NewFile => {
                let effect = self.open_single(UNTITLED_FILE_NAME.to_string(), String::new());
                DispatchResult::changed(vec![effect])
            }
            Action::OpenRecent { name } => match self.state.recent.get(&name).cloned() {
                Some(file) => {
                    let effect = self.open_single(file.name, file.content);
                    DispatchResult::changed(vec![effect])
                }
                None => {
                    let error = WorkspaceError::UnknownRecentFile(name);
                    DispatchResult::failed(
                        error.clone(),
                        vec![Effect::Notify(Notification::warning(error.to_string()))],
                    )
                }
            },
            Action::SwitchActiveFile { index } => self.switch_active_file(index),
            Action::EditContent(text) => {
                if !self.state.workspace.edit_content(text) {
                    return DispatchResult::unchanged();
                }
                self.persist_workspace();
                DispatchResult::changed(Vec::new())
            }
            Action::SetActiveTabView { view } => self.set_active_tab_view(view),
            Action::RequestExplanation => self.request_artifact(ArtifactKind::Explanation),
            Action::RequestTestbench => self.request_artifact(ArtifactKind::Testbench),
            Action::ResetTestbench => {
                let key = self.active_key();
                self.state
                    .artifacts
                    .reset_testbench(&key, self.storage.as_mut());
                DispatchResult::changed(Vec::new())
            }
            Action::CopyExplanation => {
                let explanation = self.active_entry().explanation().to_string();
                if explanation.is_empty() {
                    return DispatchResult::with_effects(vec![Effect::Notify(Notification::info(
                        "No explanation to copy",
                    ))]);
                }
                DispatchResult::with_effects(vec![Effect::SetClipboardText(explanation)])
            }
            Action::ArtifactArrived(msg) => self.apply_artifact(msg),
            Action::ArtifactFailed { kind, key, error } => {
                self.state.in_flight.remove(kind, &key);
                tracing::warn!(
                    kind = kind.as_str(),
                    key = %key,
                    error = %error,
                    "artifact request failed"
                );
                let message = format!("Failed to generate {}: {}", kind.as_str(), error);
                DispatchResult {
                    effects: vec![Effect::Notify(Notification::error(message))],
                    state_changed: true,
                    error: Some(error),
                }
            }
            Action::LoadFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "load rejected");
                DispatchResult::failed(
                    error.clone(),
                    vec![Effect::Notify(Notification::warning(error.to_string()))],
                )
            }
            Action::ClearAll => self.clear_all(),
        }
    }

    fn open_single(&mut self, name: String, content: String) -> Effect {
        tracing::info!(file = %name, "opened file");
        self.state
            .workspace
            .open_single_file(name.clone(), content.clone());
        self.persist_workspace();
        self.touch_recent(name, content)
    }

    fn open_project(&mut self, files: Vec<FileEntity>) -> DispatchResult {
        let upload = Effect::UploadFolder {
            files: files.clone(),
        };
        let count = files.len();
        let first = match self.state.workspace.open_project(files) {
            Ok(first) => first.clone(),
            Err(error) => {
                return DispatchResult::failed(
                    error.clone(),
                    vec![Effect::Notify(Notification::warning(error.to_string()))],
                );
            }
        };
        tracing::info!(files = count, active = first.name(), "opened project");
        self.persist_workspace();
        let (name, content) = first.into_parts();
        let recent = self.touch_recent(name, content);
        DispatchResult::changed(vec![upload, recent])
    }

    /// Workspace, then artifact key, then recent files, all before returning.
    fn switch_active_file(&mut self, index: usize) -> DispatchResult {
        let selected = match self.state.workspace.switch_active_file(index) {
            Ok(selected) => selected.clone(),
            Err(error) => {
                tracing::error!(error = %error, "switch_active_file misuse");
                return DispatchResult::failed(error, Vec::new());
            }
        };
        self.persist_workspace();

        let key = display_key(selected.name());
        let view = self
            .state
            .artifacts
            .entry(&key, self.storage.as_ref())
            .active_tab_view();
        tracing::debug!(key = %key, view = view.as_str(), "artifact key switched");

        let (name, content) = selected.into_parts();
        let recent = self.touch_recent(name, content);
        DispatchResult::changed(vec![recent])
    }

    fn set_active_tab_view(&mut self, view: TabView) -> DispatchResult {
        let key = self.active_key();
        match self
            .state
            .artifacts
            .set_active_tab_view(&key, view, self.storage.as_mut())
        {
            Ok(changed) => DispatchResult {
                effects: Vec::new(),
                state_changed: changed,
                error: None,
            },
            Err(error) => {
                tracing::error!(
                    key = %key,
                    view = view.as_str(),
                    error = %error,
                    "invalid tab view"
                );
                DispatchResult::failed(error, Vec::new())
            }
        }
    }

    fn request_artifact(&mut self, kind: ArtifactKind) -> DispatchResult {
        let source = self.state.workspace.editor_content();
        if source.trim().is_empty() {
            return DispatchResult::with_effects(vec![Effect::Notify(Notification::warning(
                "Editor is empty",
            ))]);
        }
        let source = source.to_string();
        let key = self.active_key();
        self.state.in_flight.insert(kind, &key);
        tracing::info!(kind = kind.as_str(), key = %key, "artifact requested");

        let effect = match kind {
            ArtifactKind::Explanation => Effect::RequestExplanation { key, source },
            ArtifactKind::Testbench => Effect::RequestTestbench { key, source },
        };
        DispatchResult::changed(vec![effect])
    }

    fn apply_artifact(&mut self, msg: ArtifactMessage) -> DispatchResult {
        let was_loading = self.state.in_flight.remove(msg.kind, &msg.key);

        let active = self.active_key();
        let target = match self.state.config.response_binding {
            ResponseBinding::Originating => msg.key,
            ResponseBinding::ActiveAtArrival => active.clone(),
        };
        if target != active {
            tracing::debug!(
                kind = msg.kind.as_str(),
                key = %target,
                active = %active,
                "artifact stored for inactive file"
            );
        }

        let before = self
            .state
            .artifacts
            .entry(&target, self.storage.as_ref())
            .clone();
        let storage = self.storage.as_mut();
        match msg.kind {
            ArtifactKind::Explanation => {
                self.state
                    .artifacts
                    .set_explanation(&target, msg.payload, &active, storage);
            }
            ArtifactKind::Testbench => {
                self.state
                    .artifacts
                    .set_testbench(&target, msg.payload, &active, storage);
            }
        }
        let stored = self.state.artifacts.peek(&target) != Some(&before);
        if !stored {
            tracing::debug!(kind = msg.kind.as_str(), key = %target, "duplicate artifact ignored");
        }
        DispatchResult {
            effects: Vec::new(),
            state_changed: was_loading || stored,
            error: None,
        }
    }

    fn clear_all(&mut self) -> DispatchResult {
        self.state.workspace.clear();
        self.state.artifacts.clear();
        self.state.recent.clear();
        self.state.in_flight.clear();
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear storage");
        }
        tracing::info!("workspace cleared");
        DispatchResult::changed(vec![
            Effect::ClearBackendSession,
            Effect::RecentFilesChanged(Vec::new()),
        ])
    }

    fn touch_recent(&mut self, name: String, content: String) -> Effect {
        self.state.recent.touch(name, content);
        if let Err(e) = self.state.recent.persist(self.storage.as_mut()) {
            tracing::warn!(error = %e, "failed to persist recent files");
        }
        Effect::RecentFilesChanged(self.state.recent.snapshot().to_vec())
    }

    fn persist_workspace(&mut self) {
        if let Err(e) = self.state.workspace.persist(self.storage.as_mut()) {
            tracing::warn!(error = %e, "failed to persist workspace");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
