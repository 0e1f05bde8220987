//! JSON-backed local lock cache.

use super::metadata::LockRecord;
use crate::error::{LockableError, Result};
use crate::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    #[serde(default)]
    locks: Vec<LockRecord>,
}

/// Locks known locally, at most one record per path.
#[derive(Debug, Clone)]
pub struct LockCache {
    path: PathBuf,
    locks: Vec<LockRecord>,
}

impl LockCache {
    /// An empty cache that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            locks: Vec::new(),
        }
    }

    /// Load the cache from `path`. A missing file is an empty cache.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::empty(path)),
            Err(e) => return Err(LockableError::io("read lock cache", path, e)),
        };

        let file: CacheFile = serde_json::from_str(&content).map_err(|e| {
            LockableError::UserError(format!(
                "failed to parse lock cache '{}': {}",
                path.display(),
                e
            ))
        })?;

        if file.version != CACHE_VERSION {
            return Err(LockableError::UserError(format!(
                "unsupported lock cache version {} in '{}' (expected {})",
                file.version,
                path.display(),
                CACHE_VERSION
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            locks: file.locks,
        })
    }

    /// Write the cache back to its file atomically.
    pub fn save(&self) -> Result<()> {
        let file = CacheFile {
            version: CACHE_VERSION,
            locks: self.locks.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            LockableError::UserError(format!("failed to serialize lock cache: {}", e))
        })?;
        atomic_write(&self.path, json.as_bytes())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in insertion order.
    pub fn locks(&self) -> &[LockRecord] {
        &self.locks
    }

    /// The record for `path`, if locked.
    pub fn find(&self, path: &str) -> Option<&LockRecord> {
        self.locks.iter().find(|lock| lock.path == path)
    }

    /// Record a lock, replacing any existing record for the same path.
    pub fn insert(&mut self, record: LockRecord) {
        match self.locks.iter_mut().find(|lock| lock.path == record.path) {
            Some(existing) => *existing = record,
            None => self.locks.push(record),
        }
    }

    /// Remove and return the record for `path`.
    pub fn remove(&mut self, path: &str) -> Option<LockRecord> {
        let index = self.locks.iter().position(|lock| lock.path == path)?;
        Some(self.locks.remove(index))
    }

    /// Returns true if `path` is locked by `owner`.
    pub fn is_locked_by(&self, path: &str, owner: &str) -> bool {
        self.find(path).is_some_and(|lock| lock.owner == owner)
    }
}
