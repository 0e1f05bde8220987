//! CLI argument parsing for lockable.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// lockable: keep lockable files read-only unless you hold their lock.
///
/// Files whose paths match a pattern carrying the `lockable` attribute in
/// `.gitattributes` are made read-only, except those currently locked by you,
/// which are made writable.
#[derive(Parser, Debug)]
#[command(name = "lockable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). LOCKABLE_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockable.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the patterns marked lockable.
    Patterns,

    /// Report whether paths are lockable.
    ///
    /// Paths are relative to the repository root.
    Check(CheckArgs),

    /// Fix write flags of lockable files.
    ///
    /// Lockable files you hold a lock on are made writable; all other
    /// lockable files are made read-only. Other files are not touched.
    Fix(FixArgs),

    /// List locks recorded in the local lock cache.
    Locks,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Repository-relative paths to check.
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// Arguments for the `fix` command.
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Directory to fix, relative to the repository root or absolute.
    /// Defaults to the whole repository.
    pub dir: Option<PathBuf>,

    /// Only fix files directly inside the directory.
    #[arg(long)]
    pub no_recursive: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
