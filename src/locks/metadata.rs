//! Lock records stored in the local lock cache.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single lock held on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Identifier of the lock.
    #[serde(default)]
    pub id: String,

    /// Canonical path of the locked file.
    pub path: String,

    /// Committer identity holding the lock.
    pub owner: String,

    /// When the lock was taken (RFC3339).
    pub locked_at: DateTime<Utc>,
}

impl LockRecord {
    /// Create a lock record taken now.
    pub fn new(path: impl Into<String>, owner: impl Into<String>) -> Self {
        let locked_at = Utc::now();
        Self {
            id: format!("local-{}-{}", std::process::id(), locked_at.timestamp_micros()),
            path: path.into(),
            owner: owner.into(),
            locked_at,
        }
    }

    /// How long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.locked_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }
}

impl std::fmt::Display for LockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (owner: {}, age: {})",
            self.path,
            self.owner,
            self.age_string()
        )
    }
}
