//! Identity of the current committer, compared against lock owners.

use crate::config::Config;
use crate::error::Result;
use crate::git;
use std::path::Path;

/// Resolve the committer identity for the repository at `repo_root`.
///
/// Order: `config.committer`, then `Name <email>` from git config (either half
/// alone is accepted), then `USER@HOST`.
pub fn current_committer(repo_root: &Path, config: &Config) -> Result<String> {
    if let Some(committer) = &config.committer {
        return Ok(committer.trim().to_string());
    }

    let name = git::get_config_value(repo_root, "user.name")?;
    let email = git::get_config_value(repo_root, "user.email")?;

    Ok(match (name, email) {
        (Some(name), Some(email)) => format!("{} <{}>", name, email),
        (Some(name), None) => name,
        (None, Some(email)) => format!("<{}>", email),
        (None, None) => get_owner_string(),
    })
}

fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
