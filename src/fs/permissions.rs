//! Write-flag updates for lockable files.

use crate::error::{LockableError, Result};
use std::fs::{self, Permissions};
use std::path::{Path, PathBuf};

/// Applies "writable iff locked" to files in the working tree.
pub trait PermissionWriter: Send + Sync {
    /// Make the file at `canonical_path` writable or read-only.
    ///
    /// Returns `Ok(true)` when the file's permissions changed and `Ok(false)`
    /// when they already matched.
    fn set_writable(&self, canonical_path: &str, writable: bool) -> Result<bool>;
}

impl<T: PermissionWriter + ?Sized> PermissionWriter for std::sync::Arc<T> {
    fn set_writable(&self, canonical_path: &str, writable: bool) -> Result<bool> {
        (**self).set_writable(canonical_path, writable)
    }
}

/// [`PermissionWriter`] that changes file modes on disk.
///
/// On Unix, making a file writable adds the owner write bit and making it
/// read-only clears every write bit. Elsewhere the read-only attribute is
/// toggled.
#[derive(Debug, Clone)]
pub struct FsPermissions {
    repo_root: PathBuf,
}

impl FsPermissions {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl PermissionWriter for FsPermissions {
    fn set_writable(&self, canonical_path: &str, writable: bool) -> Result<bool> {
        let path = self.repo_root.join(canonical_path);

        let mut permissions = fs::metadata(&path)
            .map_err(|e| LockableError::io("stat", &path, e))?
            .permissions();

        if !apply_write_flag(&mut permissions, writable) {
            return Ok(false);
        }

        fs::set_permissions(&path, permissions)
            .map_err(|e| LockableError::io("set permissions on", &path, e))?;
        Ok(true)
    }
}

/// Returns true if the file at `path` is writable by its owner.
pub fn is_writable(path: &Path) -> Result<bool> {
    let permissions = fs::metadata(path)
        .map_err(|e| LockableError::io("stat", path, e))?
        .permissions();
    Ok(has_write_flag(&permissions))
}

#[cfg(unix)]
fn apply_write_flag(permissions: &mut Permissions, writable: bool) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let mode = permissions.mode();
    let new_mode = if writable { mode | 0o200 } else { mode & !0o222 };
    if new_mode == mode {
        return false;
    }
    permissions.set_mode(new_mode);
    true
}

#[cfg(not(unix))]
fn apply_write_flag(permissions: &mut Permissions, writable: bool) -> bool {
    if permissions.readonly() != writable {
        return false;
    }
    permissions.set_readonly(!writable);
    true
}

#[cfg(unix)]
fn has_write_flag(permissions: &Permissions) -> bool {
    use std::os::unix::fs::PermissionsExt;
    permissions.mode() & 0o200 != 0
}

#[cfg(not(unix))]
fn has_write_flag(permissions: &Permissions) -> bool {
    !permissions.readonly()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_with_file(name: &str) -> (TempDir, FsPermissions) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "data").unwrap();
        let writer = FsPermissions::new(temp_dir.path());
        (temp_dir, writer)
    }

    #[test]
    fn test_make_read_only_then_writable() {
        let (temp_dir, writer) = repo_with_file("art/layers.psd");
        let path = temp_dir.path().join("art/layers.psd");
        assert!(is_writable(&path).unwrap());

        assert!(writer.set_writable("art/layers.psd", false).unwrap());
        assert!(!is_writable(&path).unwrap());

        assert!(writer.set_writable("art/layers.psd", true).unwrap());
        assert!(is_writable(&path).unwrap());
    }

    #[test]
    fn test_unchanged_permissions_report_false() {
        let (_temp_dir, writer) = repo_with_file("secret1.bin");

        assert!(!writer.set_writable("secret1.bin", true).unwrap());
        assert!(writer.set_writable("secret1.bin", false).unwrap());
        assert!(!writer.set_writable("secret1.bin", false).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_clears_all_write_bits() {
        use std::os::unix::fs::PermissionsExt;

        let (temp_dir, writer) = repo_with_file("shared.psd");
        let path = temp_dir.path().join("shared.psd");
        fs::set_permissions(&path, Permissions::from_mode(0o666)).unwrap();

        writer.set_writable("shared.psd", false).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o444);

        writer.set_writable("shared.psd", true).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o644);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FsPermissions::new(temp_dir.path());

        let err = writer.set_writable("missing.psd", false).unwrap_err();
        assert!(matches!(err, LockableError::Io { action: "stat", .. }));
    }
}
