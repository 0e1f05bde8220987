//! The lock-state seam and its lock-cache implementation.

use super::cache::LockCache;
use super::identity::current_committer;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::Result;

/// Answers whether a path is locked by the active committer.
pub trait LockState: Send + Sync {
    fn is_locked_by_current_committer(&self, canonical_path: &str) -> bool;
}

impl<T: LockState + ?Sized> LockState for std::sync::Arc<T> {
    fn is_locked_by_current_committer(&self, canonical_path: &str) -> bool {
        (**self).is_locked_by_current_committer(canonical_path)
    }
}

/// [`LockState`] backed by a [`LockCache`] snapshot.
#[derive(Debug, Clone)]
pub struct LocalLockState {
    cache: LockCache,
    committer: String,
}

impl LocalLockState {
    pub fn new(cache: LockCache, committer: impl Into<String>) -> Self {
        Self {
            cache,
            committer: committer.into(),
        }
    }

    /// Load the lock cache and committer identity for a repository.
    pub fn from_context(ctx: &RepoContext, config: &Config) -> Result<Self> {
        let cache = LockCache::load(ctx.lock_cache_path(config))?;
        let committer = current_committer(&ctx.repo_root, config)?;
        Ok(Self::new(cache, committer))
    }

    pub fn committer(&self) -> &str {
        &self.committer
    }

    pub fn cache(&self) -> &LockCache {
        &self.cache
    }
}

impl LockState for LocalLockState {
    fn is_locked_by_current_committer(&self, canonical_path: &str) -> bool {
        self.cache.is_locked_by(canonical_path, &self.committer)
    }
}
