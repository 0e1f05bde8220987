//! Visits produced by a tree walk, and canonical path computation.

use crate::error::{LockableError, Result};
use std::borrow::Cow;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// One entry seen during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVisit {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Path relative to the repository root, `/`-separated.
    pub canonical: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileVisit {
    /// Last component of the canonical path.
    pub fn file_name(&self) -> Option<&str> {
        self.canonical.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Express `path` relative to `repo_root` using `/` separators.
///
/// Fails with [`LockableError::PathResolution`] when `path` is not below
/// `repo_root`, climbs out of it with `..`, or is not valid UTF-8.
pub fn canonical_path(repo_root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(repo_root)
        .map_err(|_| LockableError::path_resolution(path, repo_root))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| LockableError::path_resolution(path, repo_root))?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return Err(LockableError::path_resolution(path, repo_root)),
        }
    }

    Ok(parts.join("/"))
}

/// Convert a user-supplied relative path to forward slashes on hosts whose
/// separator is `\`. On other hosts a backslash is an ordinary file name
/// character and the path is returned unchanged.
pub fn to_canonical_separators(path: &str) -> Cow<'_, str> {
    if MAIN_SEPARATOR == '\\' && path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}
