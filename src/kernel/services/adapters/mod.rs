//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod backend;
pub mod file;
pub mod paths;
pub mod runtime;
pub mod settings;
pub mod storage;

pub use backend::OfflineBackend;
pub use file::{collect_folder, load_folder, load_single, read_raw_file};
pub use paths::{ensure_data_dir, ensure_log_dir, get_data_dir, get_log_dir, get_state_file_path};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use storage::{JsonFileStore, MemoryStore};
