//! Repair passes: keep lockable files' write flags in sync with lock state.
//!
//! [`LockableFiles`] is the entry point. It owns the pattern cache and the
//! lock-state and permission collaborators, and exposes:
//! - [`get_lockable_patterns`](LockableFiles::get_lockable_patterns) /
//!   [`refresh_lockable_patterns`](LockableFiles::refresh_lockable_patterns)
//! - [`is_file_lockable`](LockableFiles::is_file_lockable)
//! - [`fix_all_lockable_file_write_flags`](LockableFiles::fix_all_lockable_file_write_flags)
//! - [`fix_lockable_file_write_flags_in_dir`](LockableFiles::fix_lockable_file_write_flags_in_dir)
//!
//! # Repair semantics
//!
//! A lockable file is made writable when the current committer holds its lock
//! and read-only otherwise. Files that match no lockable pattern are never
//! touched. A pass stops at the first error; files fixed before the error
//! keep their new permissions.


use crate::attributes::{AttributeSource, GitAttributes};
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::Result;
use crate::fs::{FsPermissions, PermissionWriter};
use crate::locks::{LocalLockState, LockState};
use crate::patterns::PatternCache;
use crate::walk::{TreeWalk, resolve_dir, to_canonical_separators};
use std::path::{Path, PathBuf};

/// Counts from one repair pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Files seen by the walk.
    pub files_visited: usize,
    /// Files matching a lockable pattern.
    pub lockable_files: usize,
    /// Lockable files whose write flag was turned on.
    pub made_writable: usize,
    /// Lockable files whose write flag was turned off.
    pub made_read_only: usize,
    /// Lockable files that already had the right permissions.
    pub unchanged: usize,
}

impl RepairReport {
    /// Number of files whose permissions changed.
    pub fn changed(&self) -> usize {
        self.made_writable + self.made_read_only
    }
}

impl std::fmt::Display for RepairReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file(s) scanned, {} lockable: {} made writable, {} made read-only, {} unchanged",
            self.files_visited,
            self.lockable_files,
            self.made_writable,
            self.made_read_only,
            self.unchanged
        )
    }
}

/// Lockable-file operations for one repository.
///
/// Safe to share across threads: the pattern cache serializes its own
/// population and invalidation, and repair passes hold no other shared state.
pub struct LockableFiles {
    repo_root: PathBuf,
    patterns: PatternCache,
    lock_state: Box<dyn LockState>,
    permissions: Box<dyn PermissionWriter>,
    skip_dirs: Vec<String>,
}

impl LockableFiles {
    /// Assemble from explicit collaborators. No directories are skipped.
    pub fn new(
        repo_root: impl Into<PathBuf>,
        attributes: Box<dyn AttributeSource>,
        lock_state: Box<dyn LockState>,
        permissions: Box<dyn PermissionWriter>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            patterns: PatternCache::new(attributes),
            lock_state,
            permissions,
            skip_dirs: Vec::new(),
        }
    }

    /// Assemble the default collaborators for a resolved repository:
    /// attribute files, the local lock cache, and on-disk permissions.
    pub fn from_context(ctx: &RepoContext, config: &Config) -> Result<Self> {
        let attributes = GitAttributes::from_context(ctx, config);
        let lock_state = LocalLockState::from_context(ctx, config)?;
        let permissions = FsPermissions::new(&ctx.repo_root);

        Ok(Self::new(
            &ctx.repo_root,
            Box::new(attributes),
            Box::new(lock_state),
            Box::new(permissions),
        )
        .with_skip_dirs(config.skip_dirs.clone()))
    }

    /// Directory names that repair passes never descend into.
    pub fn with_skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = dirs;
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// The patterns marked lockable, in declaration order.
    pub fn get_lockable_patterns(&self) -> Vec<String> {
        self.patterns.get().patterns().to_vec()
    }

    /// Re-read the attribute files on next use.
    pub fn refresh_lockable_patterns(&self) {
        self.patterns.invalidate();
    }

    /// Returns true if `path` (relative to the repository root) matches a
    /// lockable pattern.
    pub fn is_file_lockable(&self, path: &str) -> bool {
        self.patterns.get().is_lockable(&to_canonical_separators(path))
    }

    /// Repair every lockable file in the repository.
    ///
    /// Run after a clone or checkout so that file permissions reflect lock
    /// state.
    pub fn fix_all_lockable_file_write_flags(&self) -> Result<RepairReport> {
        self.fix_lockable_file_write_flags_in_dir("", true)
    }

    /// Repair the lockable files in `dir`.
    ///
    /// `dir` is either relative to the repository root or an absolute path
    /// inside it. Without `recursive`, only files directly inside `dir` are
    /// considered.
    pub fn fix_lockable_file_write_flags_in_dir(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<RepairReport> {
        let start = resolve_dir(&self.repo_root, dir.as_ref())?;
        let patterns = self.patterns.get();
        let mut report = RepairReport::default();

        let walk =
            TreeWalk::new(&self.repo_root, start, recursive).skip_dirs(self.skip_dirs.clone());
        for visit in walk {
            let visit = visit?;
            if visit.is_dir {
                continue;
            }
            report.files_visited += 1;

            if !patterns.is_lockable(&visit.canonical) {
                continue;
            }
            report.lockable_files += 1;

            let locked = self.lock_state.is_locked_by_current_committer(&visit.canonical);
            if self.permissions.set_writable(&visit.canonical, locked)? {
                tracing::debug!(path = %visit.canonical, writable = locked, "fixed write flag");
                if locked {
                    report.made_writable += 1;
                } else {
                    report.made_read_only += 1;
                }
            } else {
                report.unchanged += 1;
            }
        }

        tracing::debug!(
            dir = %dir.as_ref().display(),
            recursive,
            changed = report.changed(),
            "repair pass finished"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for LockableFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockableFiles")
            .field("repo_root", &self.repo_root)
            .field("patterns", &self.patterns)
            .field("skip_dirs", &self.skip_dirs)
            .finish_non_exhaustive()
    }
}
