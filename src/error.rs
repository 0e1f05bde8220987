//! Error types for lockable.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for lockable operations.
///
/// Each variant maps to a specific process exit code (see [`exit_codes`]).
#[derive(Error, Debug)]
pub enum LockableError {
    /// A directory argument does not exist.
    #[error("'{}' does not exist", .0.display())]
    NotFound(PathBuf),

    /// A directory argument exists but is not a directory.
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),

    /// Listing, stat, or permission write failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A path could not be expressed relative to the repository root.
    #[error("cannot resolve '{}' relative to repository root '{}'", path.display(), root.display())]
    PathResolution { path: PathBuf, root: PathBuf },

    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl LockableError {
    /// Build an [`LockableError::Io`] for the given action and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        LockableError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Build a [`LockableError::PathResolution`] for `path` under `root`.
    pub fn path_resolution(path: &Path, root: &Path) -> Self {
        LockableError::PathResolution {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockableError::NotFound(_)
            | LockableError::NotADirectory(_)
            | LockableError::Io { .. }
            | LockableError::PathResolution { .. } => exit_codes::FS_FAILURE,
            LockableError::UserError(_) => exit_codes::USER_ERROR,
            LockableError::GitError(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for lockable operations.
pub type Result<T> = std::result::Result<T, LockableError>;
