use super::message::AppMessage;
use crate::kernel::services::adapters::file::{load_folder, load_single};
use crate::kernel::services::ports::Backend;
use crate::kernel::services::{ArtifactBridge, ArtifactKind};
use crate::kernel::{Effect, WorkspaceError};
use crate::models::{FileEntity, Normalizer};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    backend: Arc<dyn Backend>,
    bridge: ArtifactBridge,
    normalizer: Arc<Normalizer>,
}

impl AsyncRuntime {
    pub fn new(
        tx: Sender<AppMessage>,
        backend: Arc<dyn Backend>,
        bridge: ArtifactBridge,
        normalizer: Normalizer,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            backend,
            bridge,
            normalizer: Arc::new(normalizer),
        })
    }

    /// Starts IO effects; hands everything else back for the shell to handle.
    pub fn run_effect(&self, effect: Effect) -> Option<Effect> {
        match effect {
            Effect::LoadFile(path) => self.load_file(path),
            Effect::LoadFolder(path) => self.load_folder(path),
            Effect::UploadFile { name, content } => self.upload_file(name, content),
            Effect::UploadFolder { files } => self.upload_folder(files),
            Effect::RequestExplanation { key, source } => self.request_explanation(key, source),
            Effect::RequestTestbench { key, source } => self.request_testbench(key, source),
            Effect::ClearBackendSession => self.clear_session(),
            other => return Some(other),
        }
        None
    }

    pub fn load_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        let normalizer = Arc::clone(&self.normalizer);
        self.runtime.spawn(async move {
            let path_for_read = path.clone();
            let result =
                tokio::task::spawn_blocking(move || load_single(&path_for_read, &normalizer)).await;
            let msg = match result {
                Ok(Ok(file)) => AppMessage::FileLoaded { path, file },
                Ok(Err(error)) => AppMessage::LoadFailed { path, error },
                Err(e) => AppMessage::LoadFailed {
                    path,
                    error: WorkspaceError::Io(e.to_string()),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn load_folder(&self, path: PathBuf) {
        let tx = self.tx.clone();
        let normalizer = Arc::clone(&self.normalizer);
        self.runtime.spawn(async move {
            let path_for_walk = path.clone();
            let result =
                tokio::task::spawn_blocking(move || load_folder(&path_for_walk, &normalizer)).await;
            let msg = match result {
                Ok(Ok(files)) => AppMessage::FolderLoaded { path, files },
                Ok(Err(error)) => AppMessage::LoadFailed { path, error },
                Err(e) => AppMessage::LoadFailed {
                    path,
                    error: WorkspaceError::Io(e.to_string()),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn upload_file(&self, name: String, content: String) {
        let tx = self.tx.clone();
        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            let msg = match backend.upload_file(name, content).await {
                Ok(preview) => {
                    tracing::debug!(file = %preview.filename, "upload accepted");
                    AppMessage::UploadCompleted {
                        preview: Some(preview),
                    }
                }
                Err(e) => AppMessage::BackendFailed {
                    op: "upload_file",
                    error: e.into(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn upload_folder(&self, files: Vec<FileEntity>) {
        let tx = self.tx.clone();
        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            let msg = match backend.upload_folder(files).await {
                Ok(()) => AppMessage::UploadCompleted { preview: None },
                Err(e) => AppMessage::BackendFailed {
                    op: "upload_folder",
                    error: e.into(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Failures become the explanation text itself.
    pub fn request_explanation(&self, key: String, source: String) {
        if !self.bridge.explanation.is_attached() {
            tracing::debug!(key = %key, "no explanation consumer; result will be dropped");
        }
        let backend = Arc::clone(&self.backend);
        let bridge = self.bridge.clone();
        self.runtime.spawn(async move {
            let text = match backend.explain(source).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "explain request failed");
                    format!("Error: {}", e)
                }
            };
            bridge.explanation.inject(key, text);
        });
    }

    pub fn request_testbench(&self, key: String, source: String) {
        let tx = self.tx.clone();
        let backend = Arc::clone(&self.backend);
        let bridge = self.bridge.clone();
        self.runtime.spawn(async move {
            match backend.generate_testbench(source).await {
                Ok(code) => {
                    bridge.testbench.inject(key, code);
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::ArtifactFailed {
                        kind: ArtifactKind::Testbench,
                        key,
                        error: e.into(),
                    });
                }
            }
        });
    }

    /// Fire-and-forget; a failure is logged and never blocks the local clear.
    pub fn clear_session(&self) {
        let tx = self.tx.clone();
        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            let msg = match backend.clear_session().await {
                Ok(()) => AppMessage::SessionCleared,
                Err(e) => {
                    tracing::warn!(error = %e, "backend session clear failed");
                    AppMessage::BackendFailed {
                        op: "clear_session",
                        error: e.into(),
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
