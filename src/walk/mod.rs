//! Directory traversal for repair passes.
//!
//! [`TreeWalk`] lazily yields a [`FileVisit`] for every entry below a directory,
//! driven by an explicit stack of pending directories rather than recursion.
//! Every visit carries its canonical path: relative to the repository root,
//! forward slashes only.

mod tree;
mod visit;


pub use tree::{TreeWalk, resolve_dir};
pub use visit::{FileVisit, canonical_path, to_canonical_separators};
