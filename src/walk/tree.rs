//! Lazy, stack-driven directory walk.

use super::visit::{FileVisit, canonical_path};
use crate::error::{LockableError, Result};
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a repair root against the repository root and check that it is a
/// directory.
///
/// Relative `dir`s are joined onto `repo_root`; absolute ones are used as-is.
pub fn resolve_dir(repo_root: &Path, dir: &Path) -> Result<PathBuf> {
    let abs = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        repo_root.join(dir)
    };

    let metadata = fs::metadata(&abs).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            LockableError::NotFound(dir.to_path_buf())
        } else {
            LockableError::io("stat", &abs, e)
        }
    })?;

    if !metadata.is_dir() {
        return Err(LockableError::NotADirectory(dir.to_path_buf()));
    }

    Ok(abs)
}

/// Iterator over the entries below a directory.
///
/// Directories are yielded and, when the walk is recursive, descended into
/// after the current directory has been listed. Without recursion only the
/// immediate files are yielded and subdirectories are not visited at all.
/// Directories named in `skip_dirs` are never visited. Symbolic links are
/// skipped.
///
/// The first error is yielded once and ends the walk.
#[derive(Debug)]
pub struct TreeWalk {
    repo_root: PathBuf,
    recursive: bool,
    skip_dirs: Vec<String>,
    pending: Vec<PathBuf>,
    current: Option<(PathBuf, ReadDir)>,
    finished: bool,
}

impl TreeWalk {
    /// Walk `start`, computing canonical paths relative to `repo_root`.
    pub fn new(repo_root: &Path, start: PathBuf, recursive: bool) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            recursive,
            skip_dirs: Vec::new(),
            pending: vec![start],
            current: None,
            finished: false,
        }
    }

    /// Directory names that are never visited or descended into.
    pub fn skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = dirs;
        self
    }

    fn fail(&mut self, err: LockableError) -> Option<Result<FileVisit>> {
        self.finished = true;
        self.pending.clear();
        self.current = None;
        Some(Err(err))
    }

    fn is_skipped(&self, name: &std::ffi::OsStr) -> bool {
        self.skip_dirs.iter().any(|skip| name == skip.as_str())
    }
}

impl Iterator for TreeWalk {
    type Item = Result<FileVisit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some((dir, entries)) = self.current.as_mut() else {
                let Some(dir) = self.pending.pop() else {
                    self.finished = true;
                    return None;
                };
                match fs::read_dir(&dir) {
                    Ok(entries) => self.current = Some((dir, entries)),
                    Err(e) => return self.fail(LockableError::io("read directory", &dir, e)),
                }
                continue;
            };

            let entry = match entries.next() {
                None => {
                    self.current = None;
                    continue;
                }
                Some(Err(e)) => {
                    let err = LockableError::io("read directory", dir.as_path(), e);
                    return self.fail(err);
                }
                Some(Ok(entry)) => entry,
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => return self.fail(LockableError::io("stat", &path, e)),
            };

            if file_type.is_symlink() {
                tracing::trace!("skipping symlink {}", path.display());
                continue;
            }

            let is_dir = file_type.is_dir();
            if is_dir && (!self.recursive || self.is_skipped(&entry.file_name())) {
                continue;
            }

            let canonical = match canonical_path(&self.repo_root, &path) {
                Ok(canonical) => canonical,
                Err(e) => return self.fail(e),
            };

            if is_dir {
                self.pending.push(path.clone());
            }

            tracing::trace!(path = %canonical, is_dir, "visit");
            return Some(Ok(FileVisit {
                path,
                canonical,
                is_dir,
            }));
        }
    }
}

impl std::iter::FusedIterator for TreeWalk {}
