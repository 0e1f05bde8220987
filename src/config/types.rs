//! Default value functions used by the Config struct.

/// Default lock cache location, relative to the git directory.
pub const DEFAULT_LOCK_CACHE: &str = "lockable/locks.json";

pub(crate) fn default_lock_cache() -> String {
    DEFAULT_LOCK_CACHE.to_string()
}

/// Directory names that are never descended into during a repair pass.
pub fn default_skip_dirs() -> Vec<String> {
    vec![".git".to_string()]
}

pub(crate) fn default_true() -> bool {
    true
}
