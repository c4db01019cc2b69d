//! Services layer (ports + adapters).
//!
//! - `ports`: contracts/types the kernel depends on (storage, backend, config).
//! - `adapters`: OS/runtime specific implementations (IO/async).
//! - `bridge`: typed injection points for asynchronous artifact results.

pub mod adapters;
pub mod bridge;
pub mod ports;

pub use bridge::{ArtifactBridge, ArtifactKind, ArtifactMessage, ArtifactReceiver, InjectionPoint};
