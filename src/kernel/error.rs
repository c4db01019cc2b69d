use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    InvalidExtension(String),
    NoMatchingFiles,
    IndexOutOfRange { index: usize, len: usize },
    InvalidTabView,
    UnknownRecentFile(String),
    MalformedPersistedState { key: String, reason: String },
    BackendRequestFailed(String),
    Io(String),
}

impl WorkspaceError {
    /// Misuse of the core API rather than something the user did.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            WorkspaceError::IndexOutOfRange { .. } | WorkspaceError::InvalidTabView
        )
    }
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::InvalidExtension(name) => {
                write!(f, "Only .v or .sv files are allowed: {}", name)
            }
            WorkspaceError::NoMatchingFiles => write!(f, "No Verilog files found"),
            WorkspaceError::IndexOutOfRange { index, len } => {
                write!(f, "file index {} out of range (project has {})", index, len)
            }
            WorkspaceError::InvalidTabView => {
                write!(f, "testbench view requested while no testbench is available")
            }
            WorkspaceError::UnknownRecentFile(name) => {
                write!(f, "{} is no longer in the recent files list", name)
            }
            WorkspaceError::MalformedPersistedState { key, reason } => {
                write!(f, "malformed persisted state under {}: {}", key, reason)
            }
            WorkspaceError::BackendRequestFailed(reason) => {
                write!(f, "backend request failed: {}", reason)
            }
            WorkspaceError::Io(reason) => write!(f, "IO error: {}", reason),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<io::Error> for WorkspaceError {
    fn from(e: io::Error) -> Self {
        WorkspaceError::Io(e.to_string())
    }
}
