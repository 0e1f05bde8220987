//! Filesystem utilities for lockable.
//!
//! - [`atomic_write`] persists the local lock cache without ever leaving a
//!   half-written file behind.
//! - [`PermissionWriter`] is the seam through which repair passes flip write
//!   flags; [`FsPermissions`] is the real implementation.

pub mod atomic;
mod permissions;

pub use atomic::atomic_write;
pub use permissions::{FsPermissions, PermissionWriter, is_writable};
