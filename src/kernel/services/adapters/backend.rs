use crate::kernel::services::ports::backend::{
    Backend, BackendError, BackendFuture, UploadPreview,
};
use crate::models::FileEntity;

/// Backend used when no analysis service is configured: every call fails fast.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBackend;

impl OfflineBackend {
    fn unavailable<T: Send + 'static>() -> BackendFuture<T> {
        Box::pin(async { Err(BackendError::NotConfigured) })
    }
}

impl Backend for OfflineBackend {
    fn upload_file(&self, _name: String, _content: String) -> BackendFuture<UploadPreview> {
        Self::unavailable()
    }

    fn upload_folder(&self, _files: Vec<FileEntity>) -> BackendFuture<()> {
        Self::unavailable()
    }

    fn explain(&self, _source: String) -> BackendFuture<String> {
        Self::unavailable()
    }

    fn generate_testbench(&self, _source: String) -> BackendFuture<String> {
        Self::unavailable()
    }

    fn clear_session(&self) -> BackendFuture<()> {
        Self::unavailable()
    }
}
