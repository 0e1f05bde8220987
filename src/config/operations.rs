//! Config loading and validation.

use super::model::Config;
use crate::error::{LockableError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LockableError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockableError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, using defaults when the file does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml turns an empty document into unit, not an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockableError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LockableError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_cache` must be a non-empty relative path
    /// - `committer`, when set, must not be blank
    /// - `skip_dirs` entries must be non-empty directory names without separators
    pub fn validate(&self) -> Result<()> {
        if self.lock_cache.trim().is_empty() {
            return Err(LockableError::UserError(
                "config validation failed: lock_cache must not be empty".to_string(),
            ));
        }
        if Path::new(&self.lock_cache).is_absolute() {
            return Err(LockableError::UserError(format!(
                "config validation failed: lock_cache must be relative to the git directory (found '{}')",
                self.lock_cache
            )));
        }

        if let Some(committer) = &self.committer
            && committer.trim().is_empty()
        {
            return Err(LockableError::UserError(
                "config validation failed: committer must not be blank".to_string(),
            ));
        }

        for dir in &self.skip_dirs {
            if dir.is_empty() {
                return Err(LockableError::UserError(
                    "config validation failed: skip_dirs entries must be non-empty".to_string(),
                ));
            }
            if dir.contains('/') || dir.contains('\\') {
                return Err(LockableError::UserError(format!(
                    "config validation failed: skip_dirs entries must be directory names, not paths (found '{}')",
                    dir
                )));
            }
        }

        Ok(())
    }
}
