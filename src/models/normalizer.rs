//! Upload normalizer
//!
//! Turns a single picked file or the files of a picked folder into an ordered
//! list of `FileEntity`, keeping only accepted HDL sources.

use super::FileEntity;
use crate::kernel::WorkspaceError;

pub const DEFAULT_EXTENSIONS: [&str; 2] = [".v", ".sv"];

/// Raw bytes as they come off the file system or a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub path: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            bytes,
        }
    }

    fn decode(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    extensions: Vec<String>,
}

impl Normalizer {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_ascii_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .filter(|ext| ext.len() > 1)
            .collect();
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn accepts(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    pub fn normalize_single(&self, raw: RawFile) -> Result<FileEntity, WorkspaceError> {
        if !self.accepts(&raw.name) {
            return Err(WorkspaceError::InvalidExtension(raw.name));
        }
        let content = raw.decode();
        let content = trim_trailing_newlines(&content);
        Ok(FileEntity::standalone(raw.name, content))
    }

    /// Keeps accepted files in input order; rejected files are dropped silently.
    pub fn normalize_folder(&self, raws: Vec<RawFile>) -> Result<Vec<FileEntity>, WorkspaceError> {
        let files: Vec<FileEntity> = raws
            .into_iter()
            .filter(|raw| self.accepts(&raw.name))
            .map(|raw| {
                let content = raw.decode();
                FileEntity::new(raw.name, raw.path, content)
            })
            .collect();

        if files.is_empty() {
            return Err(WorkspaceError::NoMatchingFiles);
        }
        Ok(files)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

pub fn trim_trailing_newlines(text: &str) -> &str {
    text.trim_end_matches(&['\n', '\r'][..])
}

#[cfg(test)]
#[path = "../../tests/unit/models/normalizer.rs"]
mod tests;
