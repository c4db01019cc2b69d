use std::future::Future;
use std::pin::Pin;

use crate::kernel::WorkspaceError;
use crate::models::FileEntity;

pub type BackendFuture<T> =
    Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    NotConfigured,
    Request(String),
    Timeout,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotConfigured => write!(f, "backend not configured"),
            BackendError::Request(msg) => write!(f, "{}", msg),
            BackendError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for WorkspaceError {
    fn from(e: BackendError) -> Self {
        WorkspaceError::BackendRequestFailed(e.to_string())
    }
}

/// Response of the single-file upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreview {
    pub filename: String,
    pub preview: String,
}

/// Analysis backend. The kernel stores what it returns and never computes it.
pub trait Backend: Send + Sync {
    fn upload_file(&self, name: String, content: String) -> BackendFuture<UploadPreview>;
    fn upload_folder(&self, files: Vec<FileEntity>) -> BackendFuture<()>;
    fn explain(&self, source: String) -> BackendFuture<String>;
    fn generate_testbench(&self, source: String) -> BackendFuture<String>;
    fn clear_session(&self) -> BackendFuture<()>;
}
