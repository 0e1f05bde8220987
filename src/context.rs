//! Repository context resolution for lockable.
//!
//! Finds the Git repository root (the base every canonical path is relative to)
//! and the git directory from any working directory, and derives the paths of
//! the files lockable reads: the optional config file, the repository-local
//! attributes file, and the local lock cache.

use crate::config::Config;
use crate::error::{LockableError, Result};
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the optional config file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".lockable.yaml";

/// Resolved paths for a repository. All paths are absolute.
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Absolute path to the working tree root.
    pub repo_root: PathBuf,

    /// Absolute path to the git directory (usually `{repo_root}/.git`).
    pub git_dir: PathBuf,
}

impl RepoContext {
    /// Resolve the repository context from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(RepoContext)` - Successfully resolved context
    /// * `Err(LockableError::UserError)` - If not in a git repository (exit code 1)
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            LockableError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the repository context from a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let cwd = cwd.as_ref();
        let repo_root = git::get_repo_root(cwd)?;
        let git_dir = git::get_git_dir(cwd)?;

        Ok(Self { repo_root, git_dir })
    }

    /// Get the path to the optional config file.
    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(CONFIG_FILE_NAME)
    }

    /// Get the path to the repository-local attributes file (`.git/info/attributes`).
    pub fn info_attributes_path(&self) -> PathBuf {
        self.git_dir.join("info").join("attributes")
    }

    /// Get the path to the local lock cache configured in `config`.
    pub fn lock_cache_path(&self, config: &Config) -> PathBuf {
        self.git_dir.join(&config.lock_cache)
    }

    /// Load the config for this repository, falling back to defaults when the
    /// config file does not exist.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_or_default(self.config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, create_test_repo};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_from_repo_root() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        let expected_root = temp_dir.path().canonicalize().unwrap();
        assert_eq!(ctx.repo_root.canonicalize().unwrap(), expected_root);
        assert!(ctx.git_dir.ends_with(".git"));
    }

    #[test]
    fn test_resolve_from_subdirectory() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("art").join("textures");
        std::fs::create_dir_all(&subdir).unwrap();

        let ctx = RepoContext::resolve_from(&subdir).unwrap();

        let expected_root = temp_dir.path().canonicalize().unwrap();
        assert_eq!(ctx.repo_root.canonicalize().unwrap(), expected_root);
    }

    #[test]
    fn test_resolve_outside_repo_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = RepoContext::resolve_from(temp_dir.path()).unwrap_err();

        assert!(matches!(err, LockableError::UserError(_)));
        assert!(err.to_string().contains("not inside a git repository"));
    }

    #[test]
    #[serial]
    fn test_resolve_uses_current_directory() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let ctx = RepoContext::resolve().unwrap();
        let expected_root = temp_dir.path().canonicalize().unwrap();
        assert_eq!(ctx.repo_root.canonicalize().unwrap(), expected_root);
    }

    #[test]
    fn test_derived_paths() {
        let ctx = RepoContext {
            repo_root: PathBuf::from("/repo"),
            git_dir: PathBuf::from("/repo/.git"),
        };
        let config = Config::default();

        assert_eq!(ctx.config_path(), PathBuf::from("/repo/.lockable.yaml"));
        assert_eq!(
            ctx.info_attributes_path(),
            PathBuf::from("/repo/.git/info/attributes")
        );
        assert_eq!(
            ctx.lock_cache_path(&config),
            PathBuf::from("/repo/.git/lockable/locks.json")
        );
    }

    #[test]
    fn test_load_config_defaults_when_missing() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        let config = ctx.load_config().unwrap();
        assert_eq!(config.skip_dirs, vec![".git".to_string()]);
    }
}
