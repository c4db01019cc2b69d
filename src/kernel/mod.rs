//! Headless workspace core (state/action/effect).

pub mod action;
pub mod artifacts;
pub mod effect;
pub mod error;
pub mod persistence;
pub mod recent;
pub mod services;
pub mod state;
pub mod store;
pub mod workspace;

pub use action::Action;
pub use artifacts::{display_key, ArtifactCache, ArtifactCacheEntry, TabView, BLANK_KEY};
pub use effect::{Effect, Notification, NotificationLevel};
pub use error::WorkspaceError;
pub use recent::{RecentFile, RecentFiles, DEFAULT_RECENT_CAPACITY};
pub use state::{AppState, InFlight};
pub use store::{DispatchResult, Store};
pub use workspace::{Document, WorkspaceState, UNTITLED_FILE_NAME};
