//! Service ports: traits + data contracts.

pub mod backend;
pub mod config;
pub mod settings;
pub mod storage;

pub use backend::{Backend, BackendError, BackendFuture, UploadPreview};
pub use config::{ResponseBinding, WorkspaceConfig};
pub use settings::{Settings, StorageKind};
pub use storage::{KeyValueStore, Result as StorageResult, StorageError};
