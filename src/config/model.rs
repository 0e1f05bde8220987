//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for lockable.
///
/// This struct represents the contents of `.lockable.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Lock state
    // =========================================================================
    /// Path of the local lock cache, relative to the git directory.
    #[serde(default = "default_lock_cache")]
    pub lock_cache: String,

    /// Committer identity to compare lock owners against.
    ///
    /// When unset, the identity comes from `git config user.name` / `user.email`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer: Option<String>,

    // =========================================================================
    // Traversal
    // =========================================================================
    /// Directory names that a repair pass never descends into.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    // =========================================================================
    // Attribute sources
    // =========================================================================
    /// Whether to read `.git/info/attributes`.
    #[serde(default = "default_true")]
    pub read_info_attributes: bool,

    /// Whether to read `.gitattributes` files below the repository root.
    #[serde(default = "default_true")]
    pub scan_nested_attributes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_cache: default_lock_cache(),
            committer: None,
            skip_dirs: default_skip_dirs(),
            read_info_attributes: default_true(),
            scan_nested_attributes: default_true(),
        }
    }
}
