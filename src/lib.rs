//! veriwork - workspace state and per-file artifact cache for an HDL editor shell
//!
//! Module layout:
//! - models: file records and the upload normalizer
//! - kernel: headless core (workspace, artifact cache, recent files, store)
//! - kernel::services: ports (storage, backend, settings) and their adapters

pub mod kernel;
pub mod models;
