//! Lock state for lockable.
//!
//! A lockable file is writable only while the current committer holds its
//! lock. This module answers "is this path locked by me?" through the
//! [`LockState`] seam.
//!
//! # Local Lock Cache
//!
//! The default [`LocalLockState`] reads a JSON lock cache stored under the git
//! directory (`.git/lockable/locks.json` unless configured otherwise). Each
//! record holds:
//! - `id`: Identifier assigned by whoever recorded the lock
//! - `path`: Canonical path of the locked file
//! - `owner`: Committer identity (e.g., `Jane Doe <jane@example.com>`)
//! - `locked_at`: RFC3339 timestamp
//!
//! The cache is written atomically; a missing cache means nothing is locked.

mod cache;
mod identity;
mod metadata;
mod state;


pub use cache::LockCache;
pub use identity::current_committer;
pub use metadata::LockRecord;
pub use state::{LocalLockState, LockState};
