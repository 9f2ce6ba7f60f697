//! Error types for workspace operations.
//!
//! Each layer has its own error: [`SandboxError`] for path confinement,
//! [`IdentityError`] for the ledger, and [`WorkspaceError`] for the
//! operations built on both. [`ErrorCategory`] gives transports a single
//! classification to map onto their own status codes.

pub use crate::identity::IdentityError;
pub use crate::sandbox::SandboxError;

use crate::identity::DocId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from [`Workspace`](crate::Workspace) operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Client path could not be confined to the root.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// Identity ledger failure.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The id is mapped but the entry is gone from disk.
    #[error("Document {0} not found")]
    NotFound(DocId),

    /// A file operation was requested on a directory.
    #[error("Document {0} is not a file")]
    NotAFile(DocId),

    /// The destination of a create, move or rename already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The request itself is unusable (missing name, moving into itself, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Host path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl WorkspaceError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| WorkspaceError::Io { path, source }
    }

    /// Classify this error for transport mapping.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from(self)
    }
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Transport-neutral classification of workspace errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The client sent something unusable.
    InvalidInput,
    /// The addressed document does not exist.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// Storage or filesystem failure on our side.
    Internal,
}

impl From<&io::Error> for ErrorCategory {
    fn from(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => ErrorCategory::NotFound,
            io::ErrorKind::AlreadyExists => ErrorCategory::Conflict,
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename => {
                ErrorCategory::InvalidInput
            }
            _ => ErrorCategory::Internal,
        }
    }
}

impl From<&WorkspaceError> for ErrorCategory {
    fn from(e: &WorkspaceError) -> Self {
        match e {
            WorkspaceError::Sandbox(_)
            | WorkspaceError::NotAFile(_)
            | WorkspaceError::InvalidRequest(_) => ErrorCategory::InvalidInput,
            WorkspaceError::Identity(IdentityError::NotFound(_)) | WorkspaceError::NotFound(_) => {
                ErrorCategory::NotFound
            }
            WorkspaceError::Identity(_) => ErrorCategory::Internal,
            WorkspaceError::AlreadyExists(_) => ErrorCategory::Conflict,
            WorkspaceError::Io { source, .. } => ErrorCategory::from(source),
        }
    }
}
