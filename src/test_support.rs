//! Shared helpers for unit tests: scratch git repositories, a working
//! directory guard, and in-memory collaborators.

use crate::attributes::{AttributePath, AttributeSource};
use crate::error::{LockableError, Result};
use crate::fs::PermissionWriter;
use crate::locks::LockState;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Duration;
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a git repository with one commit and a configured committer.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// Write `files` (relative paths) under `root`, creating parent directories.
pub(crate) fn write_files(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "data").unwrap();
    }
}

/// Attribute source with replaceable content that counts how often it is read.
pub(crate) struct StaticAttributes {
    paths: Mutex<Vec<AttributePath>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl StaticAttributes {
    pub(crate) fn new(paths: Vec<AttributePath>) -> Self {
        Self {
            paths: Mutex::new(paths),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Lockable entries for each pattern.
    pub(crate) fn lockable(patterns: &[&str]) -> Self {
        Self::new(patterns.iter().map(|p| AttributePath::new(*p, true)).collect())
    }

    /// Sleep on every read, widening race windows.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set(&self, paths: Vec<AttributePath>) {
        *self.paths.lock().unwrap() = paths;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AttributeSource for StaticAttributes {
    fn list_attribute_paths(&self) -> Vec<AttributePath> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.paths.lock().unwrap().clone()
    }
}

/// Lock state with a fixed set of paths locked by the current committer.
pub(crate) struct FixedLocks(Mutex<HashSet<String>>);

impl FixedLocks {
    pub(crate) fn new(locked: &[&str]) -> Self {
        Self(Mutex::new(locked.iter().map(|p| p.to_string()).collect()))
    }

    pub(crate) fn lock(&self, path: &str) {
        self.0.lock().unwrap().insert(path.to_string());
    }

    pub(crate) fn unlock(&self, path: &str) {
        self.0.lock().unwrap().remove(path);
    }
}

impl LockState for FixedLocks {
    fn is_locked_by_current_committer(&self, canonical_path: &str) -> bool {
        self.0.lock().unwrap().contains(canonical_path)
    }
}

/// Permission writer that wraps another and records every call, optionally
/// failing for one path.
pub(crate) struct RecordingPermissions<W> {
    inner: W,
    calls: Mutex<Vec<(String, bool)>>,
    fail_on: Option<String>,
}

impl<W: PermissionWriter> RecordingPermissions<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    pub(crate) fn failing_on(mut self, path: &str) -> Self {
        self.fail_on = Some(path.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl<W: PermissionWriter> PermissionWriter for RecordingPermissions<W> {
    fn set_writable(&self, canonical_path: &str, writable: bool) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((canonical_path.to_string(), writable));
        if self.fail_on.as_deref() == Some(canonical_path) {
            return Err(LockableError::io(
                "set permissions on",
                canonical_path,
                io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
            ));
        }
        self.inner.set_writable(canonical_path, writable)
    }
}
