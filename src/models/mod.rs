//! Data models

pub mod file_entity;
pub mod normalizer;

pub use file_entity::FileEntity;
pub use normalizer::{trim_trailing_newlines, Normalizer, RawFile, DEFAULT_EXTENSIONS};
