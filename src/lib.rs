//! lockable: keep the write permissions of lockable files in sync with their
//! lock state.
//!
//! Files matching a pattern marked `lockable` in the repository's attribute
//! files are kept read-only unless the current committer holds their lock.
//! [`LockableFiles`] is the entry point; the attribute source, lock state, and
//! permission writer it consults are traits with default implementations.

pub mod attributes;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod locks;
pub mod patterns;
pub mod repair;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{LockableError, Result};
pub use repair::{LockableFiles, RepairReport};
