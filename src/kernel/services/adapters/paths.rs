//! Per-user directories
//!
//! | base  | Linux                          | macOS                         | Windows                      |
//! |-------|--------------------------------|-------------------------------|------------------------------|
//! | data  | `$XDG_DATA_HOME`, `~/.local/share` | `~/Library/Application Support` | `%APPDATA%`              |
//! | cache | `$XDG_CACHE_HOME`, `~/.cache`  | `~/Library/Caches`            | `%LOCALAPPDATA%`, `%APPDATA%` |
//!
//! Workspace state and logs live under `<data>/veriwork`; settings under the cache base.

use std::path::PathBuf;

const APP_NAME: &str = "veriwork";
const LOG_DIR: &str = "logs";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Data,
    Cache,
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_dir(rel: &str) -> Option<PathBuf> {
    env_dir("HOME").map(|home| home.join(rel))
}

#[cfg(target_os = "linux")]
fn base_dir(base: Base) -> Option<PathBuf> {
    match base {
        Base::Data => env_dir("XDG_DATA_HOME").or_else(|| home_dir(".local/share")),
        Base::Cache => env_dir("XDG_CACHE_HOME").or_else(|| home_dir(".cache")),
    }
}

#[cfg(target_os = "macos")]
fn base_dir(base: Base) -> Option<PathBuf> {
    match base {
        Base::Data => home_dir("Library/Application Support"),
        Base::Cache => home_dir("Library/Caches"),
    }
}

#[cfg(target_os = "windows")]
fn base_dir(base: Base) -> Option<PathBuf> {
    match base {
        Base::Data => env_dir("APPDATA"),
        Base::Cache => env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA")),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn base_dir(_base: Base) -> Option<PathBuf> {
    None
}

pub(crate) fn get_cache_dir() -> Option<PathBuf> {
    base_dir(Base::Cache)
}

pub fn get_data_dir() -> Option<PathBuf> {
    base_dir(Base::Data).map(|dir| dir.join(APP_NAME))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(LOG_DIR))
}

/// Backing file of the persisted workspace.
pub fn get_state_file_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(STATE_FILE))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {} directory", what),
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_data_dir(), "data")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
