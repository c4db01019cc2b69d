//! `setting.json` under the per-user cache directory.

use std::path::{Path, PathBuf};

use super::paths::get_cache_dir;
use crate::kernel::services::ports::settings::Settings;

const SETTINGS_DIR: &str = ".veriwork";
const SETTINGS_FILE: &str = "setting.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Writes a default settings file on first run; an existing file is left untouched.
pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&Settings::default())?;
    std::fs::write(path, content)
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// `None` when the file is missing or unparsable.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    parse_settings(&data)
}

fn parse_settings(data: &str) -> Option<Settings> {
    serde_json::from_str(data)
        .map_err(|e| tracing::warn!(error = %e, "invalid settings file, using defaults"))
        .ok()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
