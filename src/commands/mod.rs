//! Command implementations for lockable.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler resolves the repository from the current
//! directory, loads its config, and renders its output as text so the
//! rendering can be tested without capturing stdout.

use crate::cli::{CheckArgs, Command, FixArgs};
use lockable::config::Config;
use lockable::context::RepoContext;
use lockable::fs::is_writable;
use lockable::locks::LocalLockState;
use lockable::{LockableFiles, Result};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let config = ctx.load_config()?;
    tracing::debug!(repo_root = %ctx.repo_root.display(), "resolved repository");

    let output = match command {
        Command::Patterns => render_patterns(&ctx, &config)?,
        Command::Check(args) => render_check(&ctx, &config, &args)?,
        Command::Fix(args) => render_fix(&ctx, &config, &args)?,
        Command::Locks => render_locks(&ctx, &config)?,
    };
    print!("{}", output);
    Ok(())
}

fn render_patterns(ctx: &RepoContext, config: &Config) -> Result<String> {
    let files = LockableFiles::from_context(ctx, config)?;
    let patterns = files.get_lockable_patterns();

    let mut out = String::new();
    if patterns.is_empty() {
        out.push_str("No lockable patterns.\n");
    }
    for pattern in patterns {
        let _ = writeln!(out, "{}", pattern);
    }
    Ok(out)
}

fn render_check(ctx: &RepoContext, config: &Config, args: &CheckArgs) -> Result<String> {
    let files = LockableFiles::from_context(ctx, config)?;

    let mut out = String::new();
    for path in &args.paths {
        if !files.is_file_lockable(path) {
            let _ = writeln!(out, "{}: not lockable", path);
            continue;
        }

        let on_disk = ctx.repo_root.join(path);
        if on_disk.is_file() {
            let state = if is_writable(&on_disk)? {
                "writable"
            } else {
                "read-only"
            };
            let _ = writeln!(out, "{}: lockable ({})", path, state);
        } else {
            let _ = writeln!(out, "{}: lockable", path);
        }
    }
    Ok(out)
}

fn render_fix(ctx: &RepoContext, config: &Config, args: &FixArgs) -> Result<String> {
    let files = LockableFiles::from_context(ctx, config)?;
    let dir = args.dir.clone().unwrap_or_else(PathBuf::new);

    let report = files.fix_lockable_file_write_flags_in_dir(&dir, !args.no_recursive)?;
    Ok(format!("{}\n", report))
}

fn render_locks(ctx: &RepoContext, config: &Config) -> Result<String> {
    let state = LocalLockState::from_context(ctx, config)?;
    let records = state.cache().locks();

    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No locks recorded.\n");
        return Ok(out);
    }

    let _ = writeln!(out, "Locks ({}):", records.len());
    for record in records {
        let mine = if record.owner == state.committer() {
            " (yours)"
        } else {
            ""
        };
        let _ = writeln!(out, "  {}{}", record.path, mine);
        let _ = writeln!(out, "    Owner:  {}", record.owner);
        let _ = writeln!(
            out,
            "    Locked: {} ({} ago)",
            record.locked_at.format("%Y-%m-%d %H:%M:%S UTC"),
            record.age_string()
        );
    }
    Ok(out)
}
