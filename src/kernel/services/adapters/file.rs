//! Reads picked files and folders from the local file system.

use ignore::WalkBuilder;
use std::path::{Component, Path};

use crate::kernel::WorkspaceError;
use crate::models::{FileEntity, Normalizer, RawFile};

pub fn read_raw_file(path: &Path) -> std::io::Result<RawFile> {
    let name = file_name(path);
    let bytes = std::fs::read(path)?;
    Ok(RawFile::new(name.clone(), name, bytes))
}

/// Every accepted file under `root`, sorted by path. Relative paths start with
/// the folder's own name, like a browser directory pick.
pub fn collect_folder(root: &Path, normalizer: &Normalizer) -> std::io::Result<Vec<RawFile>> {
    if !root.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", root.display()),
        ));
    }
    // `.` or `sub/..` have no usable parent until resolved.
    let root = std::fs::canonicalize(root)?;
    let base = root.parent().unwrap_or(&root);

    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let name = file_name(path);
        if !normalizer.accepts(&name) {
            continue;
        }
        let Some(bytes) = read_or_skip(path) else {
            continue;
        };
        files.push(RawFile::new(name, relative_path(path, base), bytes));
    }
    Ok(files)
}

pub fn load_single(path: &Path, normalizer: &Normalizer) -> Result<FileEntity, WorkspaceError> {
    let name = file_name(path);
    if !normalizer.accepts(&name) {
        return Err(WorkspaceError::InvalidExtension(name));
    }
    let raw = read_raw_file(path)?;
    normalizer.normalize_single(raw)
}

pub fn load_folder(root: &Path, normalizer: &Normalizer) -> Result<Vec<FileEntity>, WorkspaceError> {
    let raws = collect_folder(root, normalizer)?;
    normalizer.normalize_folder(raws)
}

/// One unreadable file does not abort the whole folder pick.
fn read_or_skip(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file.rs"]
mod tests;
